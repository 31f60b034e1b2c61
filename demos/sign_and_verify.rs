use bip_schnorr::prelude::*;

fn main() {
    println!("BIP-Schnorr Sign and Verify Example");
    println!("====================================");

    // Generate a new key pair.
    let mut rng = OsRng::new();
    let d = Secp256k1Scalar::random(&mut rng);
    let p = Secp256k1::to_affine(&Secp256k1::multiply(&Secp256k1::generator(), &d));
    let p_bytes = point_to_bytes::<Secp256k1>(&p).unwrap();

    println!("Generated new secp256k1 key pair");

    // Sign a message (the core treats `m` as an opaque 32-byte hash).
    let message = [0x5du8; 32];
    let sig = sign::<Secp256k1>(&d, &message).unwrap();

    println!("Created signature:");
    print_hex(&sig.to_bytes());

    // Verify the signature.
    match verify::<Secp256k1>(&p_bytes, &message, &sig) {
        Ok(()) => println!("\nSignature verification: success"),
        Err(e) => println!("\nSignature verification: failed ({e})"),
    }

    // A different message should fail verification with the generic error.
    let other_message = [0x5eu8; 32];
    match verify::<Secp256k1>(&p_bytes, &other_message, &sig) {
        Ok(()) => println!("Modified-message verification: success (unexpected!)"),
        Err(e) => println!("Modified-message verification: failed as expected ({e})"),
    }
}

fn print_hex(bytes: &[u8]) {
    for (i, byte) in bytes.iter().enumerate() {
        if i % 16 == 0 {
            println!();
        }
        print!("{byte:02x} ");
    }
    println!();
}

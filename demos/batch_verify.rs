use bip_schnorr::prelude::*;

fn main() {
    println!("BIP-Schnorr Batch Verification Example");
    println!("=======================================");

    let mut rng = OsRng::new();
    let mut p_bytes_list = Vec::new();
    let mut messages = Vec::new();
    let mut sigs = Vec::new();

    for i in 0..5u8 {
        let d = Secp256k1Scalar::random(&mut rng);
        let p = Secp256k1::to_affine(&Secp256k1::multiply(&Secp256k1::generator(), &d));
        let p_bytes = point_to_bytes::<Secp256k1>(&p).unwrap();
        let message = [i; 32];
        let sig = sign::<Secp256k1>(&d, &message).unwrap();

        p_bytes_list.push(p_bytes);
        messages.push(message);
        sigs.push(sig);
    }

    println!("Generated {} signatures", sigs.len());

    match batch_verify::<Secp256k1>(&p_bytes_list, &messages, &sigs) {
        Ok(()) => println!("Batch verification: success"),
        Err(e) => println!("Batch verification: failed ({e})"),
    }

    // Corrupt one signature and re-run: the whole batch now fails, without
    // identifying which signature was the culprit.
    sigs[2].s[31] ^= 0x01;
    match batch_verify::<Secp256k1>(&p_bytes_list, &messages, &sigs) {
        Ok(()) => println!("Batch verification with corrupted signature: success (unexpected!)"),
        Err(e) => println!("Batch verification with corrupted signature: failed as expected ({e})"),
    }
}

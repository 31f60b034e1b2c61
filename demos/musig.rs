use bip_schnorr::prelude::*;

fn main() {
    println!("MuSig Non-Interactive Aggregation Example");
    println!("==========================================");

    let mut rng = OsRng::new();
    let xs: Vec<Secp256k1Scalar> = (0..3).map(|_| Secp256k1Scalar::random(&mut rng)).collect();
    let message = [0x99u8; 32];

    let sig = musig_non_interactive::<Secp256k1>(&xs, &message).unwrap();
    println!("Aggregated signature (3 signers):");
    print_hex(&sig.to_bytes());

    // Recompute the aggregate public key the same way the signer did, so it
    // can be verified with the ordinary single-signature verifier.
    let mut points = Vec::new();
    let mut p_bytes_list = Vec::new();
    for x in &xs {
        let p = Secp256k1::to_affine(&Secp256k1::multiply(&Secp256k1::generator(), x));
        p_bytes_list.push(point_to_bytes::<Secp256k1>(&p).unwrap());
        points.push(p);
    }

    use schnorr_hash::Sha256;
    use digest::Digest;

    let mut l_hasher = Sha256::new();
    for pb in &p_bytes_list {
        l_hasher.update(pb);
    }
    let l = l_hasher.finalize();

    let mut aggregate = Secp256k1::identity();
    for (pb, p) in p_bytes_list.iter().zip(&points) {
        let mut hasher = Sha256::new();
        hasher.update(&l);
        hasher.update(pb);
        let a: Secp256k1Scalar = schnorr_core::Scalar::from_bytes_reduced(&hasher.finalize());
        aggregate += Secp256k1::multiply(&Secp256k1::from_affine(p), &a);
    }
    let x_bytes = point_to_bytes::<Secp256k1>(&Secp256k1::to_affine(&aggregate)).unwrap();

    match verify::<Secp256k1>(&x_bytes, &message, &sig) {
        Ok(()) => println!("\nVerification against aggregated key: success"),
        Err(e) => println!("\nVerification against aggregated key: failed ({e})"),
    }

    // Compare against the naive (rogue-key-vulnerable) sum scheme: it
    // produces a different signature over the same keys and message.
    let naive_sig = naive_key_aggregation::<Secp256k1>(&xs, &message).unwrap();
    println!(
        "\nNaive-aggregate signature differs from MuSig: {}",
        naive_sig.to_bytes() != sig.to_bytes()
    );
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

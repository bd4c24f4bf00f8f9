use crate::opts::{KeygenOpts, SignMessageOpts, ThresholdSignOpts, TxDigestOpts, VerifyMessageOpts};
use crate::tx::{transaction_preimages, TxIn, TxOut, UnsignedTransaction};

use ec_core::address::p2pkh_address;
use ec_core::codec::{serialize_compact, serialize_public_key, Signature};
use ec_core::curve::{generator, mul_scalar};
use ec_core::digest::message_bytes;
use ec_core::ecdsa::{sign_recoverable, verify_message as verify_compact_message};
use ec_core::encoding::hash160;
use ec_core::scalar::Scalar;
use ec_core::wif::wif_encode;

use anyhow::{anyhow, Result};
use rand::thread_rng;
use threshold_sig::ThresholdSignature;

pub fn keygen(opts: KeygenOpts) -> Result<()> {
    let d = Scalar::random(&mut thread_rng());
    let q = mul_scalar(&d, &generator());
    let compressed = !opts.uncompressed;

    println!("private key (WIF): {}", wif_encode(&d, compressed));
    println!("public key: {}", hex::encode(serialize_public_key(&q, compressed)));
    println!("address: {}", p2pkh_address(&q));
    Ok(())
}

pub fn sign_message(opts: SignMessageOpts) -> Result<()> {
    let (d, compressed) = ec_core::wif::wif_decode(&opts.wif)?;
    let q = mul_scalar(&d, &generator());
    let digest = message_bytes(&opts.message);
    let sig = sign_recoverable(&d, &digest, &mut thread_rng());
    let compact = serialize_compact(&sig, compressed);

    println!("address: {}", p2pkh_address(&q));
    println!("signature: {}", base64::encode(compact));
    Ok(())
}

pub fn verify_message(opts: VerifyMessageOpts) -> Result<()> {
    if !verify_compact_message(&opts.address, &opts.message, &opts.signature)? {
        return Err(anyhow!(
            "signature does not verify against claimed address {}",
            opts.address
        ));
    }
    println!("signature is valid");
    Ok(())
}

pub fn threshold_sign(opts: ThresholdSignOpts) -> Result<()> {
    let ctx = ThresholdSignature::new(opts.group_size, opts.polynomial_order)?;
    let (address, signature) = ctx.sign_message(&opts.message, &mut thread_rng())?;

    println!(
        "group: {} participants, polynomial order {}, signature threshold {}",
        ctx.group_size(),
        ctx.polynomial_order(),
        ctx.signature_threshold()
    );
    println!("group address: {}", address);
    println!("signature: {}", signature);
    Ok(())
}

pub fn tx_digest(opts: TxDigestOpts) -> Result<()> {
    let (d, _) = ec_core::wif::wif_decode(&opts.wif)?;
    let q = mul_scalar(&d, &generator());
    let pubkey_hash = hash160(&serialize_public_key(&q, true));

    let tx = UnsignedTransaction {
        version: 2,
        inputs: vec![TxIn {
            txid: [0u8; 32],
            index: 0,
            sequence: 0xffff_ffff,
            value: opts.value,
            pubkey_hash,
        }],
        outputs: vec![TxOut {
            value: opts.value.saturating_sub(1_000),
            pubkey_hash,
        }],
        locktime: 0,
    };

    let preimages = transaction_preimages(&tx)?;
    let sig = sign_recoverable(&d, &preimages[0], &mut thread_rng());
    let der = ec_core::codec::serialize_der(&Signature {
        r: sig.r,
        s: sig.s,
    });

    println!("spender address: {}", p2pkh_address(&q));
    println!("preimage: {}", hex::encode(&preimages[0]));
    println!("DER signature: {}", hex::encode(der));
    Ok(())
}

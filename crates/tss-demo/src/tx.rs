//! Unsigned-transaction records and the BIP-143 digest driver loop.
//!
//! This is the boundary collaborator the hardened core explicitly excludes:
//! `TxIn`/`TxOut` carry no cryptographic content of their own, and the
//! P2PKH locking script here is one specific, simple script among many a
//! real wallet would need to support.

use ec_core::digest::{bip143_digest, bip143_preimage, encode_varint, Bip143Input, SIGHASH_ALL_FORKID};
use ec_core::encoding::double_sha256;
use ec_core::errors::DigestError;

/// One spendable output being consumed by this transaction.
#[derive(Clone, Debug)]
pub struct TxIn {
    pub txid: [u8; 32],
    pub index: u32,
    pub sequence: u32,
    /// The value (in satoshis) of the output being spent — needed by
    /// BIP-143 even though it isn't part of the legacy transaction format.
    pub value: u64,
    /// The 20-byte `hash160` of the public key that locks the output being
    /// spent, used to rebuild its scriptPubKey as this input's scriptCode.
    pub pubkey_hash: [u8; 20],
}

/// One newly created output.
#[derive(Clone, Debug)]
pub struct TxOut {
    pub value: u64,
    pub pubkey_hash: [u8; 20],
}

/// The standard P2PKH locking script:
/// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
pub fn p2pkh_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.push(0x76); // OP_DUP
    script.push(0xa9); // OP_HASH160
    script.push(0x14); // push 20 bytes
    script.extend(pubkey_hash);
    script.push(0x88); // OP_EQUALVERIFY
    script.push(0xac); // OP_CHECKSIG
    script
}

/// `varint(count) || for each output: value(8 LE) || varint(len(script)) || script`.
pub fn serialize_outputs(outputs: &[TxOut]) -> Vec<u8> {
    let mut out = encode_varint(outputs.len() as u64);
    for output in outputs {
        out.extend(&output.value.to_le_bytes());
        let script = p2pkh_script(&output.pubkey_hash);
        out.extend(encode_varint(script.len() as u64));
        out.extend(&script);
    }
    out
}

fn prevouts_hash(inputs: &[TxIn]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(inputs.len() * 36);
    for input in inputs {
        buf.extend(&input.txid);
        buf.extend(&input.index.to_le_bytes());
    }
    double_sha256(&buf)
}

fn sequences_hash(inputs: &[TxIn]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(inputs.len() * 4);
    for input in inputs {
        buf.extend(&input.sequence.to_le_bytes());
    }
    double_sha256(&buf)
}

/// An unsigned legacy transaction, enough to derive BIP-143 digests for
/// each input.
pub struct UnsignedTransaction {
    pub version: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub locktime: u32,
}

fn bip143_inputs_of(tx: &UnsignedTransaction) -> ([u8; 32], [u8; 32], [u8; 32]) {
    let prevouts = prevouts_hash(&tx.inputs);
    let sequences = sequences_hash(&tx.inputs);
    let outputs_hash = double_sha256(&serialize_outputs(&tx.outputs));
    (prevouts, sequences, outputs_hash)
}

fn bip143_input_for<'a>(
    tx: &UnsignedTransaction,
    index: usize,
    script_code: &'a [u8],
    prevouts: [u8; 32],
    sequences: [u8; 32],
    outputs_hash: [u8; 32],
) -> Bip143Input<'a> {
    let input = &tx.inputs[index];
    Bip143Input {
        version: tx.version,
        prevouts_hash: prevouts,
        sequences_hash: sequences,
        outpoint_txid: input.txid,
        outpoint_index: input.index,
        script_code,
        value: input.value,
        sequence: input.sequence,
        outputs_hash,
        locktime: tx.locktime,
        sighash: SIGHASH_ALL_FORKID,
    }
}

/// Computes the raw BIP-143 preimage for each input, in input order. These
/// are what should be passed to `sign`/`sign_recoverable` — both already
/// apply `hash_to_int`'s `double_sha256` internally.
pub fn transaction_preimages(tx: &UnsignedTransaction) -> Result<Vec<Vec<u8>>, DigestError> {
    let (prevouts, sequences, outputs_hash) = bip143_inputs_of(tx);
    (0..tx.inputs.len())
        .map(|i| {
            let script_code = p2pkh_script(&tx.inputs[i].pubkey_hash);
            bip143_preimage(&bip143_input_for(tx, i, &script_code, prevouts, sequences, outputs_hash))
        })
        .collect()
}

/// Computes the sighash `z` for each input (the preimage's `double_sha256`),
/// in input order — useful for display, not for signing directly.
pub fn transaction_digests(tx: &UnsignedTransaction) -> Result<Vec<[u8; 32]>, DigestError> {
    let (prevouts, sequences, outputs_hash) = bip143_inputs_of(tx);
    (0..tx.inputs.len())
        .map(|i| {
            let script_code = p2pkh_script(&tx.inputs[i].pubkey_hash);
            bip143_digest(&bip143_input_for(tx, i, &script_code, prevouts, sequences, outputs_hash))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p2pkh_script_has_expected_layout() {
        let hash = [7u8; 20];
        let script = p2pkh_script(&hash);
        assert_eq!(script[0], 0x76);
        assert_eq!(script[1], 0xa9);
        assert_eq!(script[2], 0x14);
        assert_eq!(&script[3..23], &hash);
        assert_eq!(script[23], 0x88);
        assert_eq!(script[24], 0xac);
    }

    #[test]
    fn single_input_digest_is_deterministic() {
        let tx = UnsignedTransaction {
            version: 2,
            inputs: vec![TxIn {
                txid: [1u8; 32],
                index: 0,
                sequence: 0xffff_ffff,
                value: 50_000,
                pubkey_hash: [2u8; 20],
            }],
            outputs: vec![TxOut {
                value: 49_000,
                pubkey_hash: [3u8; 20],
            }],
            locktime: 0,
        };
        let digests = transaction_digests(&tx).unwrap();
        assert_eq!(digests.len(), 1);
        assert_eq!(digests, transaction_digests(&tx).unwrap());
    }

    #[test]
    fn multi_input_transaction_produces_one_digest_each() {
        let make_input = |byte: u8| TxIn {
            txid: [byte; 32],
            index: 0,
            sequence: 0xffff_ffff,
            value: 10_000,
            pubkey_hash: [byte; 20],
        };
        let tx = UnsignedTransaction {
            version: 1,
            inputs: vec![make_input(1), make_input(2)],
            outputs: vec![TxOut {
                value: 15_000,
                pubkey_hash: [9u8; 20],
            }],
            locktime: 0,
        };
        let digests = transaction_digests(&tx).unwrap();
        assert_eq!(digests.len(), 2);
        assert_ne!(digests[0], digests[1]);
    }
}

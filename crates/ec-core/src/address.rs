//! P2PKH address derivation (component I boundary: the address half lives
//! in the hardened core since it is a pure function of a curve point).

use crate::codec::serialize_public_key;
use crate::curve::Point;
use crate::encoding::{base58check_encode, hash160};

/// Mainnet P2PKH version byte.
const VERSION_P2PKH: u8 = 0x00;

/// `Base58Check(0x00 || hash160(compressed_pubkey))`.
pub fn p2pkh_address(public_key: &Point) -> String {
    let compressed = serialize_public_key(public_key, true);
    let mut payload = vec![VERSION_P2PKH];
    payload.extend(&hash160(&compressed));
    base58check_encode(&payload)
}

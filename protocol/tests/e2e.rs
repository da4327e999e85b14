//! End-to-end tests for the funding pipeline.
//!
//! Each test runs the whole flow the binary runs: decode the addresses,
//! build the unsigned transaction, sign it, and then take the hex output
//! apart again to check every field and the signature itself.

use p2sh_protocol::address::Address;
use p2sh_protocol::config::{Network, SignerConfig};
use p2sh_protocol::crypto::{double_sha256, CurveBackend, CurveContext, PublicKey};
use p2sh_protocol::script::{p2pkh_locking_script, Script};
use p2sh_protocol::transaction::{
    assemble_raw, derive_p2pkh_address, parse_transaction_hex, ParsedTransaction,
    SignedTransaction, UnsignedTransaction,
};
use p2sh_protocol::FundingError;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const KEY_WIF: &str = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf";
const KEY_ADDRESS: &str = "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm";
const INPUT_TXID: &str = "81b4c832d70cb56ff957589752eb4125a4cab78a25a8fc52d6a09e5bd4404d48";
const AMOUNT: u64 = 100_000;

/// A fixed 1-of-1 multisig redeem script: `OP_1 <G> OP_1 OP_CHECKMULTISIG`.
fn redeem_script() -> Vec<u8> {
    let mut script = vec![0x51, 0x21];
    script.extend_from_slice(
        &hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
            .unwrap(),
    );
    script.extend_from_slice(&[0x51, 0xae]);
    script
}

fn destination() -> String {
    Address::from_redeem_script(Network::Mainnet, &redeem_script()).encode()
}

/// Runs the pipeline the way the CLI does and returns the signed transaction.
fn fund(wif: &str, source: &str, destination: &str, amount: u64) -> Result<SignedTransaction, FundingError> {
    let config = SignerConfig::new(Network::Mainnet);
    let source = Address::decode_p2pkh(source, config.network)?;
    let destination = Address::decode_p2sh(destination, config.network)?;
    UnsignedTransaction::p2pkh_to_p2sh(INPUT_TXID, &source, &destination, amount)?.sign(wif, &config)
}

/// Splits a P2PKH ScriptSig into (DER signature, sighash byte, public key).
fn split_script_sig(script: &Script) -> (Vec<u8>, u8, Vec<u8>) {
    let bytes = script.as_bytes();
    let sig_push = bytes[0] as usize;
    let der = bytes[1..sig_push].to_vec();
    let sighash = bytes[sig_push];
    let key_len = bytes[sig_push + 1] as usize;
    let key = bytes[sig_push + 2..sig_push + 2 + key_len].to_vec();
    assert_eq!(bytes.len(), sig_push + 2 + key_len);
    (der, sighash, key)
}

/// Rebuilds the signing preimage from a parsed signed transaction.
fn preimage_of(parsed: &ParsedTransaction, previous_locking_script: &Script) -> Vec<u8> {
    let mut preimage = assemble_raw(
        &parsed.previous_txid.to_hex(),
        parsed.amount,
        previous_locking_script.as_bytes(),
        parsed.script_pubkey.as_bytes(),
    )
    .unwrap();
    preimage.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
    preimage
}

// ---------------------------------------------------------------------------
// 1. Full pipeline
// ---------------------------------------------------------------------------

#[test]
fn full_pipeline_produces_broadcastable_hex() {
    let signed = fund(KEY_WIF, KEY_ADDRESS, &destination(), AMOUNT).unwrap();
    let hex_out = signed.to_hex();

    assert!(hex_out.starts_with("01000000"), "version: {}", &hex_out[..8]);
    assert_eq!(&hex_out[8..10], "01", "input count");
    assert!(hex_out.chars().all(|c| c.is_ascii_hexdigit()));

    let parsed = parse_transaction_hex(&hex_out).unwrap();
    assert_eq!(parsed.version, 1);
    assert_eq!(parsed.previous_txid.to_hex(), INPUT_TXID);
    assert_eq!(parsed.amount, AMOUNT);
    assert!(parsed.script_pubkey.is_p2sh());
}

#[test]
fn fixed_constants_are_in_place() {
    let signed = fund(KEY_WIF, KEY_ADDRESS, &destination(), AMOUNT).unwrap();
    let bytes = signed.as_bytes();

    // Output index follows the 32-byte txid.
    assert_eq!(&bytes[37..41], &[0x00; 4]);

    let script_len = bytes[41] as usize;
    let after_script = 42 + script_len;
    assert_eq!(&bytes[after_script..after_script + 4], &[0xff; 4], "sequence");
    assert_eq!(bytes[after_script + 4], 0x01, "output count");
    assert_eq!(&bytes[bytes.len() - 4..], &[0x00; 4], "lock time");

    let parsed = parse_transaction_hex(&signed.to_hex()).unwrap();
    assert_eq!(parsed.previous_output_index, 0);
    assert_eq!(parsed.sequence, 0xffff_ffff);
    assert_eq!(parsed.lock_time, 0);
}

#[test]
fn destination_script_commits_to_redeem_script() {
    let signed = fund(KEY_WIF, KEY_ADDRESS, &destination(), AMOUNT).unwrap();
    let parsed = parse_transaction_hex(&signed.to_hex()).unwrap();

    let expected_hash = p2sh_protocol::crypto::hash160(&redeem_script());
    assert_eq!(&parsed.script_pubkey.as_bytes()[2..22], &expected_hash);
}

// ---------------------------------------------------------------------------
// 2. Signature validity
// ---------------------------------------------------------------------------

#[test]
fn embedded_signature_verifies_over_the_preimage() {
    let signed = fund(KEY_WIF, KEY_ADDRESS, &destination(), AMOUNT).unwrap();
    let parsed = parse_transaction_hex(&signed.to_hex()).unwrap();
    let (der, sighash, key_bytes) = split_script_sig(&parsed.script_sig);

    assert_eq!(sighash, 0x01);
    assert_eq!(key_bytes.len(), 65, "uncompressed public key");

    let public_key = PublicKey::from_bytes(key_bytes);
    assert_eq!(public_key.p2pkh_address(Network::Mainnet).encode(), KEY_ADDRESS);

    let previous = p2pkh_locking_script(&public_key.pubkey_hash());
    let digest = double_sha256(&preimage_of(&parsed, &previous));

    let ctx = CurveContext::start();
    assert!(ctx.verify(&digest, &der, &public_key));

    // The final transaction itself is not what was signed.
    assert!(!ctx.verify(&double_sha256(signed.as_bytes()), &der, &public_key));
}

#[test]
fn derived_source_address_matches_explicit_one() {
    let config = SignerConfig::default();
    let derived = derive_p2pkh_address(KEY_WIF, &config).unwrap();
    assert_eq!(derived.encode(), KEY_ADDRESS);

    let via_derived = fund(KEY_WIF, &derived.encode(), &destination(), AMOUNT).unwrap();
    let via_explicit = fund(KEY_WIF, KEY_ADDRESS, &destination(), AMOUNT).unwrap();
    assert_eq!(via_derived, via_explicit);
}

#[test]
fn txid_changes_with_amount() {
    let a = fund(KEY_WIF, KEY_ADDRESS, &destination(), AMOUNT).unwrap();
    let b = fund(KEY_WIF, KEY_ADDRESS, &destination(), AMOUNT + 1).unwrap();
    assert_ne!(a.txid(), b.txid());
    assert_eq!(a.txid().to_hex().len(), 64);
}

// ---------------------------------------------------------------------------
// 3. Failures abort the run
// ---------------------------------------------------------------------------

#[test]
fn p2pkh_destination_is_rejected() {
    let err = fund(KEY_WIF, KEY_ADDRESS, KEY_ADDRESS, AMOUNT).unwrap_err();
    assert!(matches!(err, FundingError::AddressDecode(_)));
}

#[test]
fn malformed_txid_is_rejected() {
    let config = SignerConfig::default();
    let source = Address::decode_p2pkh(KEY_ADDRESS, config.network).unwrap();
    let destination = Address::decode_p2sh(&destination(), config.network).unwrap();
    let err = UnsignedTransaction::p2pkh_to_p2sh("deadbeef", &source, &destination, AMOUNT)
        .unwrap_err();
    assert!(matches!(err, FundingError::MalformedInput(_)));
}

#[test]
fn corrupt_private_key_is_rejected() {
    let mut corrupted = KEY_WIF.to_string();
    corrupted.replace_range(10..11, if &KEY_WIF[10..11] == "a" { "b" } else { "a" });
    let err = fund(&corrupted, KEY_ADDRESS, &destination(), AMOUNT).unwrap_err();
    assert!(matches!(err, FundingError::KeyDecode(_)));
}

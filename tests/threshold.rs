//! Integration tests for threshold encryption and signatures.

use ark_ec::Group;
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use sha2::{Digest, Sha512};

use tpke::encrypt::{CipherText, DecryptionShare};
use tpke::keys::SecretKeyShare;
use tpke::parameters::ThresholdParameters;
use tpke::sign::SignatureShare;
use tpke::testing::Bls12381Sha256;
use tpke::traits::{Signer, Verifier};
use tpke::{
    CipherSuite, Combiner, Error, PublicKeySet, Scalar, SecretKeySet, ThresholdResult, G1, G2,
};

use zeroize::Zeroize;

type KeySet = SecretKeySet<Bls12381Sha256>;

fn decryption_shares<C: CipherSuite>(
    shares: &[SecretKeyShare<C>],
    ciphertext: &CipherText<C>,
) -> Vec<(u32, DecryptionShare<C>)> {
    shares
        .iter()
        .map(|share| (share.index(), share.decrypt_share(ciphertext).unwrap()))
        .collect()
}

fn signature_shares<C: CipherSuite>(
    shares: &[SecretKeyShare<C>],
    message: &[u8],
) -> Vec<(u32, SignatureShare<C>)> {
    shares
        .iter()
        .map(|share| (share.index(), Signer::sign(share, message).unwrap()))
        .collect()
}

#[test]
fn decryption_2_out_of_5() {
    let params = ThresholdParameters::new(5, 2).unwrap();
    let sk_set = KeySet::random(2, OsRng);
    let pk_set = sk_set.public_keys();
    let combiner = Combiner::new(params, pk_set.clone()).unwrap();

    let ciphertext = pk_set.public_key().encrypt(b"hello", OsRng).unwrap();
    assert!(ciphertext.verify());

    let shares = decryption_shares(&sk_set.secret_key_shares(5), &ciphertext);

    for i in 0..5 {
        for j in i + 1..5 {
            // Any two shares are not enough.
            assert_eq!(
                combiner.combine_decryption_shares(
                    &ciphertext,
                    [(i, &shares[i as usize].1), (j, &shares[j as usize].1)]
                ),
                Err(Error::InsufficientShares {
                    required: 3,
                    provided: 2
                })
            );

            // Any three shares are.
            for k in j + 1..5 {
                let subset = [
                    (i, &shares[i as usize].1),
                    (j, &shares[j as usize].1),
                    (k, &shares[k as usize].1),
                ];
                assert_eq!(
                    combiner
                        .combine_decryption_shares(&ciphertext, subset)
                        .unwrap(),
                    b"hello"
                );
            }
        }
    }
}

#[test]
fn combination_is_independent_of_order_and_subset() {
    let params = ThresholdParameters::new(7, 3).unwrap();
    let sk_set = KeySet::random(3, OsRng);
    let combiner = Combiner::new(params, sk_set.public_keys()).unwrap();
    let msg = b"The quick brown fox jumps over the lazy dog".to_vec();

    let ciphertext = sk_set.public_keys().public_key().encrypt(&msg, OsRng).unwrap();
    let shares = decryption_shares(&sk_set.secret_key_shares(7), &ciphertext);

    let forward = combiner
        .combine_decryption_shares(&ciphertext, shares.iter().map(|(i, s)| (*i, s)))
        .unwrap();
    let backward = combiner
        .combine_decryption_shares(&ciphertext, shares.iter().rev().map(|(i, s)| (*i, s)))
        .unwrap();
    let last = combiner
        .combine_decryption_shares(&ciphertext, shares[3..].iter().map(|(i, s)| (*i, s)))
        .unwrap();

    assert_eq!(forward, msg);
    assert_eq!(backward, msg);
    assert_eq!(last, msg);
    assert_eq!(sk_set.secret_key().decrypt(&ciphertext).unwrap(), msg);

    let signatures = signature_shares(&sk_set.secret_key_shares(7), &msg);
    let sig_a = combiner
        .combine_signature_shares(signatures[..4].iter().map(|(i, s)| (*i, s)))
        .unwrap();
    let sig_b = combiner
        .combine_signature_shares(signatures[2..6].iter().rev().map(|(i, s)| (*i, s)))
        .unwrap();

    assert_eq!(sig_a, sig_b);
    assert_eq!(sig_a, sk_set.secret_key().sign(&msg).unwrap());
}

#[test]
fn tampered_ciphertexts_are_rejected() {
    let params = ThresholdParameters::new(4, 1).unwrap();
    let sk_set = KeySet::random(1, OsRng);
    let pk_set = sk_set.public_keys();
    let combiner = Combiner::new(params, pk_set.clone()).unwrap();
    let key_shares = sk_set.secret_key_shares(4);

    let ciphertext = pk_set.public_key().encrypt(b"hello", OsRng).unwrap();
    let bytes = ciphertext.to_bytes().unwrap();
    let shares = decryption_shares(&key_shares, &ciphertext);

    // Flip a bit of `W`, then of `V`. Flipping bits of `U` mostly yields invalid points.
    for position in [48 * 8 + 17, 144 * 8 + 2] {
        let mut tampered = bytes.clone();
        tampered[position / 8] ^= 1 << (position % 8);

        let tampered = match CipherText::<Bls12381Sha256>::from_bytes(&tampered) {
            Ok(tampered) => tampered,
            Err(_) => continue,
        };

        assert!(!tampered.verify());
        assert!(tampered.clone().into_verified().is_err());
        assert_eq!(
            sk_set.secret_key().decrypt(&tampered),
            Err(Error::InvalidCiphertext)
        );
        assert_eq!(
            key_shares[0].decrypt_share(&tampered),
            Err(Error::InvalidCiphertext)
        );
        assert_eq!(
            combiner.combine_decryption_shares(&tampered, shares.iter().map(|(i, s)| (*i, s))),
            Err(Error::InvalidCiphertext)
        );
    }
}

#[test]
fn tampered_randomness_is_rejected() {
    let params = ThresholdParameters::new(3, 1).unwrap();
    let sk_set = KeySet::random(1, OsRng);
    let pk_set = sk_set.public_keys();
    let combiner = Combiner::new(params, pk_set.clone()).unwrap();
    let key_shares = sk_set.secret_key_shares(3);

    let ciphertext = pk_set.public_key().encrypt(b"hello", OsRng).unwrap();
    let shares = decryption_shares(&key_shares, &ciphertext);

    // Replace U with a valid point of the group.
    let u = *ciphertext.u() + G1::<Bls12381Sha256>::generator();
    let mut bytes = Vec::new();
    u.serialize_compressed(&mut bytes).unwrap();
    bytes.extend_from_slice(&ciphertext.to_bytes().unwrap()[48..]);

    let tampered = CipherText::<Bls12381Sha256>::from_bytes(&bytes).unwrap();
    assert_eq!(tampered.u(), &u);
    assert!(!tampered.verify());
    assert_eq!(
        sk_set.secret_key().decrypt(&tampered),
        Err(Error::InvalidCiphertext)
    );
    assert_eq!(
        key_shares[0].decrypt_share(&tampered),
        Err(Error::InvalidCiphertext)
    );
    assert_eq!(
        combiner.combine_decryption_shares(&tampered, shares.iter().map(|(i, s)| (*i, s))),
        Err(Error::InvalidCiphertext)
    );
}

#[test]
fn misbehaving_participants_are_identified() {
    let params = ThresholdParameters::new(5, 2).unwrap();
    let sk_set = KeySet::random(2, OsRng);
    let pk_set = sk_set.public_keys();
    let combiner = Combiner::new(params, pk_set.clone()).unwrap();
    let key_shares = sk_set.secret_key_shares(5);
    let msg = b"hello";

    let ciphertext = pk_set.public_key().encrypt(msg, OsRng).unwrap();
    let mut shares = decryption_shares(&key_shares, &ciphertext);

    // Participant 4 answers with a share of another ciphertext.
    let other = pk_set.public_key().encrypt(msg, OsRng).unwrap();
    shares[4].1 = key_shares[4].decrypt_share(&other).unwrap();

    assert_eq!(
        combiner.verify_decryption_shares(&ciphertext, shares.iter().map(|(i, s)| (*i, s))),
        Err(Error::MisbehavingParticipants(vec![4]))
    );

    // An unchecked combination including the bad share yields garbage.
    assert_ne!(
        combiner
            .combine_decryption_shares(&ciphertext, shares[2..].iter().map(|(i, s)| (*i, s)))
            .unwrap(),
        msg
    );

    let verified = combiner
        .verify_decryption_shares(&ciphertext, shares[..4].iter().map(|(i, s)| (*i, s)))
        .unwrap();
    assert_eq!(combiner.decrypt(&ciphertext, &verified).unwrap(), msg);

    // Verified shares only decrypt the ciphertext they were verified against.
    assert_eq!(
        combiner.decrypt(&other, &verified),
        Err(Error::ForeignDecryptionShare(0))
    );

    let mut signatures = signature_shares(&key_shares, msg);
    signatures[1].1 = key_shares[1].sign(b"something else").unwrap();
    signatures[3].1 = signatures[0].1.clone();

    assert_eq!(
        combiner.verify_signature_shares(msg, signatures.iter().map(|(i, s)| (*i, s))),
        Err(Error::MisbehavingParticipants(vec![1, 3]))
    );
}

#[test]
fn threshold_signature() {
    let params = ThresholdParameters::new(5, 2).unwrap();
    let sk_set = KeySet::random(2, OsRng);
    let pk_set = sk_set.public_keys();
    let combiner = Combiner::new(params, pk_set.clone()).unwrap();
    let msg = b"Signed by a threshold of participants";

    let signatures = signature_shares(&sk_set.secret_key_shares(5), msg);
    for (index, share) in signatures.iter() {
        assert!(Verifier::verify(&pk_set.public_key_share(*index), share, msg));
    }

    let verified = combiner
        .verify_signature_shares(msg, signatures[1..4].iter().map(|(i, s)| (*i, s)))
        .unwrap();
    let signature = combiner.sign(msg, &verified).unwrap();

    assert!(pk_set.public_key().verify(&signature, msg));
    assert!(!pk_set.public_key().verify(&signature, b"Something else"));
}

#[test]
fn key_material_round_trips() {
    let sk_set = KeySet::random(3, StdRng::seed_from_u64(7));
    let pk_set = sk_set.public_keys();

    let restored = KeySet::from_bytes(&sk_set.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, sk_set);

    let restored = PublicKeySet::from_bytes(&pk_set.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, pk_set);
    assert_eq!(pk_set.to_bytes().unwrap().len(), 48 * 4);

    for share in sk_set.secret_key_shares(6) {
        let restored =
            SecretKeyShare::from_bytes(share.index(), &share.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, share);
    }

    let ciphertext = pk_set.public_key().encrypt(b"hello", OsRng).unwrap();
    let bytes = ciphertext.to_bytes().unwrap();
    assert_eq!(bytes.len(), 48 + 96 + 5);
    assert_eq!(CipherText::from_bytes(&bytes).unwrap(), ciphertext);
    assert!(CipherText::<Bls12381Sha256>::from_bytes(&bytes[..100]).is_err());
}

/// A suite hashing to `G2` by multiplying the generator with a hashed scalar.
///
/// The discrete logarithm of every hash is known, which makes it insecure:
/// it only shows that any [`CipherSuite`] can be plugged in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Zeroize)]
struct MockSuite;

impl CipherSuite for MockSuite {
    type Engine = ark_bls12_381::Bls12_381;

    type InnerHasher = Sha512;

    fn context_string() -> String {
        "TPKE_MOCK".to_owned()
    }

    fn hash_to_g2(domain: &[u8], message: &[u8]) -> ThresholdResult<G2<Self>> {
        let digest = Sha512::new()
            .chain_update(domain)
            .chain_update(message)
            .finalize();
        let scalar = Scalar::<Self>::from_le_bytes_mod_order(&digest);

        Ok(G2::<Self>::generator() * scalar)
    }
}

#[test]
fn custom_ciphersuite() {
    assert_eq!(MockSuite::max_message_length(), 255 * 64);

    let params = ThresholdParameters::new(3, 1).unwrap();
    let sk_set = SecretKeySet::<MockSuite>::random(1, OsRng);
    let pk_set = sk_set.public_keys();
    let combiner = Combiner::new(params, pk_set.clone()).unwrap();

    let msg = vec![42u8; 10_000];
    let ciphertext = pk_set.public_key().encrypt(&msg, OsRng).unwrap();
    let shares = decryption_shares(&sk_set.secret_key_shares(3), &ciphertext);
    let verified = combiner
        .verify_decryption_shares(&ciphertext, shares[1..].iter().map(|(i, s)| (*i, s)))
        .unwrap();
    assert_eq!(combiner.decrypt(&ciphertext, &verified).unwrap(), msg);

    let signatures = signature_shares(&sk_set.secret_key_shares(3), b"mock");
    let signature = combiner
        .combine_signature_shares(signatures.iter().map(|(i, s)| (*i, s)))
        .unwrap();
    assert!(pk_set.public_key().verify(&signature, b"mock"));
}

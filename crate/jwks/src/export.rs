//! Derivation of a public signing JWK from a PEM private key.
//!
//! The private key is only used to derive its public counterpart (through
//! the `SubjectPublicKeyInfo` encoding); public components are then read
//! from that public key alone.

use openssl::{
    bn::{BigNum, BigNumContext},
    nid::Nid,
    pkey::{Id, PKey, Private, Public},
};
use pem::Pem;
use seatrace_logger::warn;

use crate::{
    error::{JwksError, JwksResult},
    jwk::{EcJwk, Jwk, JwksDocument, RsaJwk},
};

/// Key id used when none is given on the command line.
pub const DEFAULT_EXPORT_KID: &str = "kid-001";

/// PEM labels accepted as private keys (PKCS#8, PKCS#1 and SEC1).
pub const PRIVATE_KEY_PEM_LABELS: [&str; 3] = ["PRIVATE KEY", "RSA PRIVATE KEY", "EC PRIVATE KEY"];

/// PEM label of a passphrase protected PKCS#8 key.
pub const ENCRYPTED_PRIVATE_KEY_PEM_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// Public key material, classified once when the key is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyMaterial {
    Rsa {
        modulus: Vec<u8>,
        exponent: Vec<u8>,
    },
    Ec {
        /// JWK curve name: `P-256`, `P-384`, `P-521` or the openssl short name
        curve: String,
        x: Vec<u8>,
        y: Vec<u8>,
    },
    /// Any other key family, with a human readable type name
    Unsupported(String),
}

impl PublicKeyMaterial {
    /// Parse a PEM encoded private key and extract its public material.
    ///
    /// The input may hold several blocks (`openssl ecparam -genkey` writes
    /// an `EC PARAMETERS` block first); the first private key block is used.
    ///
    /// # Errors
    ///
    /// * `JwksError::Pem` if the text is not PEM
    /// * `JwksError::EncryptedPrivateKey` if the key is passphrase protected
    /// * `JwksError::UnsupportedKeyType` if no block is a private key
    /// * `JwksError::OpenSsl` if openssl cannot load the key
    pub fn from_private_pem(pem_bytes: &[u8]) -> JwksResult<Self> {
        let blocks = pem::parse_many(pem_bytes)?;
        if blocks.is_empty() {
            pem::parse(pem_bytes)?;
        }
        let Some(block) = blocks
            .iter()
            .find(|block| PRIVATE_KEY_PEM_LABELS.contains(&block.tag()))
        else {
            if blocks
                .iter()
                .any(|block| block.tag() == ENCRYPTED_PRIVATE_KEY_PEM_LABEL)
            {
                return Err(JwksError::EncryptedPrivateKey);
            }
            let tags = blocks.iter().map(Pem::tag).collect::<Vec<_>>().join(", ");
            return Err(JwksError::UnsupportedKeyType(format!(
                "no private key PEM block (found: {tags})"
            )));
        };
        // legacy OpenSSL encryption of PKCS#1/SEC1 blocks
        if block
            .headers()
            .get("Proc-Type")
            .is_some_and(|proc_type| proc_type.contains("ENCRYPTED"))
        {
            return Err(JwksError::EncryptedPrivateKey);
        }
        let private_key = PKey::private_key_from_pem(pem::encode(block).as_bytes())?;
        Self::from_private_key(&private_key)
    }

    /// Derive the public key of `private_key` and extract its material.
    ///
    /// # Errors
    ///
    /// Returns an error if openssl fails to derive or decode the public key.
    pub fn from_private_key(private_key: &PKey<Private>) -> JwksResult<Self> {
        let public_key = PKey::public_key_from_der(&private_key.public_key_to_der()?)?;
        Self::from_public_key(&public_key)
    }

    /// Extract the material of an openssl public key.
    ///
    /// # Errors
    ///
    /// Returns an error if openssl fails to read the key components.
    pub fn from_public_key(public_key: &PKey<Public>) -> JwksResult<Self> {
        let material = match public_key.id() {
            Id::RSA => {
                let rsa = public_key.rsa()?;
                Self::Rsa {
                    modulus: rsa.n().to_vec(),
                    exponent: rsa.e().to_vec(),
                }
            }
            Id::EC => {
                let ec_key = public_key.ec_key()?;
                let group = ec_key.group();
                let mut ctx = BigNumContext::new()?;
                let mut x = BigNum::new()?;
                let mut y = BigNum::new()?;
                ec_key
                    .public_key()
                    .affine_coordinates(group, &mut x, &mut y, &mut ctx)?;
                let size = i32::try_from(group.degree().div_ceil(8))
                    .map_err(|e| JwksError::InvalidKeyMaterial(e.to_string()))?;
                Self::Ec {
                    curve: jwk_curve_name(group.curve_name()),
                    x: x.to_vec_padded(size)?,
                    y: y.to_vec_padded(size)?,
                }
            }
            other => Self::Unsupported(key_type_name(other)),
        };
        Ok(material)
    }

    /// The JWK `kty` this material maps to.
    #[must_use]
    pub fn kty(&self) -> &str {
        match self {
            Self::Rsa { .. } => "RSA",
            Self::Ec { .. } => "EC",
            Self::Unsupported(name) => name,
        }
    }

    /// Build the public signing JWK.
    ///
    /// # Errors
    ///
    /// `JwksError::UnsupportedKeyType` for anything but RSA and EC keys.
    pub fn to_jwk(&self, kid: &str) -> JwksResult<Jwk> {
        match self {
            Self::Rsa { modulus, exponent } => Ok(RsaJwk::new(kid, modulus, exponent).into()),
            Self::Ec { curve, x, y } => {
                let alg = algorithm_for_curve(curve);
                Ok(EcJwk::new(kid, curve, x, y, alg).into())
            }
            Self::Unsupported(name) => Err(JwksError::UnsupportedKeyType(name.clone())),
        }
    }
}

/// Signature algorithm for an EC curve. Unknown curves fall back to
/// `ES256` with a warning.
#[must_use]
pub fn algorithm_for_curve(curve: &str) -> &'static str {
    match curve {
        "P-256" => "ES256",
        "P-384" => "ES384",
        "P-521" => "ES512",
        unknown => {
            warn!("Unknown curve: {unknown}, defaulting to ES256");
            "ES256"
        }
    }
}

fn jwk_curve_name(nid: Option<Nid>) -> String {
    match nid {
        Some(Nid::X9_62_PRIME256V1) => "P-256".to_owned(),
        Some(Nid::SECP384R1) => "P-384".to_owned(),
        Some(Nid::SECP521R1) => "P-521".to_owned(),
        Some(nid) => nid
            .short_name()
            .map_or_else(|_| format!("{nid:?}"), str::to_owned),
        None => "unnamed".to_owned(),
    }
}

fn key_type_name(id: Id) -> String {
    match id {
        Id::ED25519 => "Ed25519".to_owned(),
        Id::ED448 => "Ed448".to_owned(),
        Id::X25519 => "X25519".to_owned(),
        Id::X448 => "X448".to_owned(),
        Id::DSA => "DSA".to_owned(),
        Id::DH => "DH".to_owned(),
        Id::HMAC => "HMAC".to_owned(),
        other => format!("{other:?}"),
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedJwks {
    pub document: JwksDocument,
    pub kid: String,
    pub alg: String,
    pub kty: String,
}

/// Turn a PEM private key into a single-key public JWKS.
///
/// The produced JWK is serialized and scanned for private members before
/// the document is returned.
///
/// # Errors
///
/// * `JwksError::UnsupportedKeyType` for non RSA/EC keys or when no PEM block is a private key
/// * `JwksError::EncryptedPrivateKey` for passphrase protected keys
/// * `JwksError::PrivateKeyLeak` if a private member made it into the JWK
/// * `JwksError::Pem` / `JwksError::OpenSsl` if the key cannot be read
pub fn export_public_jwks(pem_bytes: &[u8], kid: &str) -> JwksResult<ExportedJwks> {
    let material = PublicKeyMaterial::from_private_pem(pem_bytes)?;
    let jwk = material.to_jwk(kid)?;
    jwk.to_public_value()?;
    Ok(ExportedJwks {
        kid: jwk.kid().to_owned(),
        alg: jwk.alg().to_owned(),
        kty: jwk.kty().to_owned(),
        document: JwksDocument::new(vec![jwk]),
    })
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use openssl::{
        ec::{EcGroup, EcKey},
        nid::Nid,
        pkey::PKey,
        rsa::Rsa,
        symm::Cipher,
    };

    use super::{PublicKeyMaterial, algorithm_for_curve, export_public_jwks};
    use crate::{
        error::JwksError,
        jwk::{Jwk, private_components},
    };

    // output of `openssl ecparam -name prime256v1`
    const EC_PARAMETERS_P256: &[u8] =
        b"-----BEGIN EC PARAMETERS-----\nBggqhkjOPQMBBw==\n-----END EC PARAMETERS-----\n";

    fn ec_pem(nid: Nid) -> Vec<u8> {
        let group = EcGroup::from_curve_name(nid).unwrap();
        let key = EcKey::generate(&group).unwrap();
        PKey::from_ec_key(key).unwrap().private_key_to_pem_pkcs8().unwrap()
    }

    #[test]
    fn rsa_export_keeps_only_public_members() {
        let rsa = Rsa::generate(2048).unwrap();
        let expected_n = rsa.n().to_vec();
        let pem = rsa.private_key_to_pem().unwrap();

        let exported = export_public_jwks(&pem, "kid-rsa").unwrap();
        assert_eq!(exported.kty, "RSA");
        assert_eq!(exported.alg, "RS256");
        assert_eq!(exported.kid, "kid-rsa");
        assert_eq!(exported.document.keys.len(), 1);

        let value = serde_json::to_value(&exported.document.keys[0]).unwrap();
        assert_eq!(value["e"], "AQAB");
        assert_eq!(
            crate::base64url::decode_any_base64(value["n"].as_str().unwrap()).unwrap(),
            expected_n
        );
        assert!(private_components(&value).is_empty());
    }

    #[test]
    fn ec_curves_map_to_algorithms() {
        for (nid, crv, alg, size) in [
            (Nid::X9_62_PRIME256V1, "P-256", "ES256", 32),
            (Nid::SECP384R1, "P-384", "ES384", 48),
            (Nid::SECP521R1, "P-521", "ES512", 66),
        ] {
            let exported = export_public_jwks(&ec_pem(nid), "kid-ec").unwrap();
            assert_eq!(exported.kty, "EC");
            assert_eq!(exported.alg, alg);
            let Jwk::Ec(jwk) = &exported.document.keys[0] else {
                panic!("EC JWK expected");
            };
            assert_eq!(jwk.crv, crv);
            let x = crate::base64url::decode_any_base64(&jwk.x).unwrap();
            let y = crate::base64url::decode_any_base64(&jwk.y).unwrap();
            assert_eq!(x.len(), size);
            assert_eq!(y.len(), size);
            let value = serde_json::to_value(jwk).unwrap();
            assert!(value.get("d").is_none());
        }
    }

    #[test]
    fn sec1_ec_private_key_is_accepted() {
        let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
        let pem = EcKey::generate(&group).unwrap().private_key_to_pem().unwrap();
        let exported = export_public_jwks(&pem, "sec1").unwrap();
        assert_eq!(exported.alg, "ES256");
    }

    #[test]
    fn leading_ec_parameters_block_is_skipped() {
        let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
        let key = EcKey::generate(&group).unwrap();
        let mut pem = EC_PARAMETERS_P256.to_vec();
        pem.extend(key.private_key_to_pem().unwrap());

        let exported = export_public_jwks(&pem, "ecparam").unwrap();
        assert_eq!(exported.kty, "EC");
        assert_eq!(exported.alg, "ES256");
        let Jwk::Ec(jwk) = &exported.document.keys[0] else {
            panic!("EC JWK expected");
        };
        let mut ctx = openssl::bn::BigNumContext::new().unwrap();
        let mut x = openssl::bn::BigNum::new().unwrap();
        let mut y = openssl::bn::BigNum::new().unwrap();
        key.public_key()
            .affine_coordinates(&group, &mut x, &mut y, &mut ctx)
            .unwrap();
        assert_eq!(
            crate::base64url::decode_any_base64(&jwk.x).unwrap(),
            x.to_vec_padded(32).unwrap()
        );
    }

    #[test]
    fn certificate_before_the_key_is_skipped() {
        let rsa = Rsa::generate(2048).unwrap();
        let mut pem = b"-----BEGIN CERTIFICATE-----\nAAECAwQFBgcICQoLDA0ODw==\n-----END CERTIFICATE-----\n".to_vec();
        pem.extend(rsa.private_key_to_pem().unwrap());
        let exported = export_public_jwks(&pem, "chain").unwrap();
        assert_eq!(exported.kty, "RSA");
    }

    #[test]
    fn encrypted_private_keys_are_reported_as_such() {
        let rsa = Rsa::generate(2048).unwrap();
        let key = PKey::from_rsa(rsa.clone()).unwrap();
        let pkcs8 = key
            .private_key_to_pem_pkcs8_passphrase(Cipher::aes_256_cbc(), b"pw")
            .unwrap();
        assert!(matches!(
            export_public_jwks(&pkcs8, "k"),
            Err(JwksError::EncryptedPrivateKey)
        ));

        let legacy = rsa
            .private_key_to_pem_passphrase(Cipher::aes_128_cbc(), b"pw")
            .unwrap();
        assert!(matches!(
            export_public_jwks(&legacy, "k"),
            Err(JwksError::EncryptedPrivateKey)
        ));
    }

    #[test]
    fn unknown_curve_defaults_to_es256() {
        assert_eq!(algorithm_for_curve("secp256k1"), "ES256");
        let exported = export_public_jwks(&ec_pem(Nid::SECP256K1), "k").unwrap();
        assert_eq!(exported.alg, "ES256");
        assert_eq!(exported.document.keys[0].kty(), "EC");
    }

    #[test]
    fn ed25519_is_unsupported() {
        let pem = PKey::generate_ed25519()
            .unwrap()
            .private_key_to_pem_pkcs8()
            .unwrap();
        let material = PublicKeyMaterial::from_private_pem(&pem).unwrap();
        assert_eq!(material, PublicKeyMaterial::Unsupported("Ed25519".to_owned()));
        assert!(matches!(
            export_public_jwks(&pem, "k"),
            Err(JwksError::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn non_private_pem_blocks_are_unsupported() {
        let rsa = Rsa::generate(2048).unwrap();
        let public_pem = rsa.public_key_to_pem().unwrap();
        assert!(matches!(
            export_public_jwks(&public_pem, "k"),
            Err(JwksError::UnsupportedKeyType(_))
        ));

        let secret = b"-----BEGIN SECRET KEY-----\nAAECAwQFBgcICQoLDA0ODw==\n-----END SECRET KEY-----\n";
        assert!(matches!(
            export_public_jwks(secret, "k"),
            Err(JwksError::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn garbage_is_a_pem_error() {
        assert!(matches!(
            export_public_jwks(b"definitely not a key", "k"),
            Err(JwksError::Pem(_))
        ));
    }
}

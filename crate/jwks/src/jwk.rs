//! Public JSON Web Keys (RFC 7517) and key sets.
//!
//! Only public members are modelled: the structs below have no field that
//! could carry a private exponent, a CRT parameter or a private scalar.

use serde::Serialize;
use serde_json::Value;

use crate::{
    base64url::encode_base64url,
    error::{JwksError, JwksResult},
};

/// JWK members that only exist on private keys (RSA `d` and CRT
/// parameters, EC/OKP private scalar `d`).
pub const PRIVATE_KEY_COMPONENTS: [&str; 6] = ["d", "p", "q", "dp", "dq", "qi"];

pub const KTY_OKP: &str = "OKP";
pub const KTY_RSA: &str = "RSA";
pub const KTY_EC: &str = "EC";
pub const CRV_ED25519: &str = "Ed25519";
pub const ALG_EDDSA: &str = "EdDSA";
pub const ALG_RS256: &str = "RS256";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUse {
    Sig,
}

/// Octet key pair, used for Ed25519 verification keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OkpJwk {
    pub kty: String,
    pub crv: String,
    pub alg: String,
    #[serde(rename = "use")]
    pub key_use: KeyUse,
    pub kid: String,
    pub x: String,
}

impl OkpJwk {
    #[must_use]
    pub fn ed25519(kid: &str, raw: &[u8]) -> Self {
        Self {
            kty: KTY_OKP.to_owned(),
            crv: CRV_ED25519.to_owned(),
            alg: ALG_EDDSA.to_owned(),
            key_use: KeyUse::Sig,
            kid: kid.to_owned(),
            x: encode_base64url(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsaJwk {
    pub kty: String,
    pub n: String,
    pub e: String,
    #[serde(rename = "use")]
    pub key_use: KeyUse,
    pub alg: String,
    pub kid: String,
}

impl RsaJwk {
    /// `modulus` and `exponent` are big-endian unsigned integers.
    #[must_use]
    pub fn new(kid: &str, modulus: &[u8], exponent: &[u8]) -> Self {
        Self {
            kty: KTY_RSA.to_owned(),
            n: encode_base64url(modulus),
            e: encode_base64url(exponent),
            key_use: KeyUse::Sig,
            alg: ALG_RS256.to_owned(),
            kid: kid.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EcJwk {
    pub kty: String,
    pub crv: String,
    pub x: String,
    pub y: String,
    #[serde(rename = "use")]
    pub key_use: KeyUse,
    pub alg: String,
    pub kid: String,
}

impl EcJwk {
    /// `x` and `y` are the affine coordinates, already left-padded to the
    /// field size of the curve.
    #[must_use]
    pub fn new(kid: &str, crv: &str, x: &[u8], y: &[u8], alg: &str) -> Self {
        Self {
            kty: KTY_EC.to_owned(),
            crv: crv.to_owned(),
            x: encode_base64url(x),
            y: encode_base64url(y),
            key_use: KeyUse::Sig,
            alg: alg.to_owned(),
            kid: kid.to_owned(),
        }
    }
}

/// A public JWK of any supported family, serialized without a variant tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Jwk {
    Rsa(RsaJwk),
    Ec(EcJwk),
    Okp(OkpJwk),
}

impl Jwk {
    #[must_use]
    pub fn kty(&self) -> &str {
        match self {
            Self::Rsa(jwk) => &jwk.kty,
            Self::Ec(jwk) => &jwk.kty,
            Self::Okp(jwk) => &jwk.kty,
        }
    }

    #[must_use]
    pub fn kid(&self) -> &str {
        match self {
            Self::Rsa(jwk) => &jwk.kid,
            Self::Ec(jwk) => &jwk.kid,
            Self::Okp(jwk) => &jwk.kid,
        }
    }

    #[must_use]
    pub fn alg(&self) -> &str {
        match self {
            Self::Rsa(jwk) => &jwk.alg,
            Self::Ec(jwk) => &jwk.alg,
            Self::Okp(jwk) => &jwk.alg,
        }
    }

    /// Serialize to a JSON object and verify it carries no private member.
    ///
    /// # Errors
    ///
    /// `JwksError::PrivateKeyLeak` if a private member is present.
    pub fn to_public_value(&self) -> JwksResult<Value> {
        let value = serde_json::to_value(self)?;
        ensure_no_private_components(&value)?;
        Ok(value)
    }
}

impl From<OkpJwk> for Jwk {
    fn from(jwk: OkpJwk) -> Self {
        Self::Okp(jwk)
    }
}

impl From<RsaJwk> for Jwk {
    fn from(jwk: RsaJwk) -> Self {
        Self::Rsa(jwk)
    }
}

impl From<EcJwk> for Jwk {
    fn from(jwk: EcJwk) -> Self {
        Self::Ec(jwk)
    }
}

/// Names of the private members present in a serialized JWK.
#[must_use]
pub fn private_components(jwk: &Value) -> Vec<String> {
    let Some(object) = jwk.as_object() else {
        return vec![];
    };
    PRIVATE_KEY_COMPONENTS
        .iter()
        .filter(|name| object.contains_key(**name))
        .map(|name| (*name).to_owned())
        .collect()
}

/// Fail if the serialized JWK exposes any private member.
///
/// # Errors
///
/// `JwksError::PrivateKeyLeak` listing the offending members.
pub fn ensure_no_private_components(jwk: &Value) -> JwksResult<()> {
    let found = private_components(jwk);
    if found.is_empty() {
        Ok(())
    } else {
        Err(JwksError::PrivateKeyLeak(found))
    }
}

/// A JSON Web Key Set: `{ "keys": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JwksDocument {
    pub keys: Vec<Jwk>,
}

impl JwksDocument {
    #[must_use]
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }

    /// Pretty printed JSON, two spaces of indentation.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_pretty_json(&self) -> JwksResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

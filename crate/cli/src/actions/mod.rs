pub mod export_jwks;

mod server_params;

pub use server_params::ServerParams;

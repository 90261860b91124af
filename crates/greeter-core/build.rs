/// Generates the gRPC client and server bindings for `proto/greet.proto`.
///
/// The generated module is exposed through `greeter_core::proto` via
/// `tonic::include_proto!("greet")`, and the encoded file descriptor set is
/// written next to it so the server can register it with the reflection
/// service.
///
/// # Panics
///
/// Panics if code generation fails, which aborts the build with protoc's
/// diagnostics.
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("greet_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/greet.proto"], &["proto"])
        .unwrap();
}

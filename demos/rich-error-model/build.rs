#![expect(
    clippy::unwrap_used,
    clippy::print_stdout,
    reason = "build script: panicking on codegen failure aborts the build, cargo reads directives from stdout"
)]

fn main() {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed=proto/rem_example.proto");

    rama::http::grpc::build::protobuf::configure()
        .compile_protos(&["proto/rem_example.proto"], &["proto"])
        .unwrap();
}

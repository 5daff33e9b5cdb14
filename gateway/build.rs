fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 网关只需要客户端代码
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(&["../proto/partner/v1/partner.proto"], &["../proto"])?;

    println!("cargo:rerun-if-changed=../proto/partner/v1/partner.proto");
    Ok(())
}

use std::process::Command;

#[test]
fn server_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_todo_server");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run todo_server --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--store"));
    assert!(stdout.contains("--port"));
}

#[test]
fn server_rejects_invalid_port_env() {
    let exe = env!("CARGO_BIN_EXE_todo_server");
    let output = Command::new(exe)
        .env("PORT", "not-a-port")
        .env_remove("TODOAPP_CONFIG_PATH")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run todo_server");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("configuration error"));
}

// Test case for NO_PANIC_STUBS lint

fn bad_todo() -> u16 {
    todo!()
}

fn bad_unimplemented() -> u16 {
    unimplemented!("remote_port")
}

// Good: report the gap as an error
fn good_error() -> Result<u16, String> {
    Err("remote_port is not supported by this adapter".to_string())
}

fn main() {
    let _ = bad_todo();
    let _ = bad_unimplemented();
    let _ = good_error();
}

// Test case for NO_PRINTLN lint

fn bad_println(cookie: &str) {
    println!("cookie header: {}", cookie);
}

fn bad_eprintln() {
    eprintln!("session type mismatch");
}

fn bad_dbg() {
    let cookies = vec![("session", "abc")];
    dbg!(cookies);
}

// Good: using tracing
fn good_tracing() {
    tracing::debug!(cookies = 1, "derived handshake cookies");
}

fn main() {
    bad_println("a=1");
    bad_eprintln();
    bad_dbg();
    good_tracing();
}

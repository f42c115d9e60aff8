use steamcard_core::client::CLIENT_MODULE;

pub fn run() {
    print!("{CLIENT_MODULE}");
}

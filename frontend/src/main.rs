fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    if let Err(e) = portfolio_frontend::web::start() {
        log::error!("Failed to start page controller: {}", e);
    }
}

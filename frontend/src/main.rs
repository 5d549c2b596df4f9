fn main() {
    folio_frontend::start();
}

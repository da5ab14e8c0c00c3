fn main() {
    worker_provision::app::cli::run();
}

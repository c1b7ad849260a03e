fn main() {
    descent::cli::run();
}

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> String;
    fn cors_origin(&self) -> String;
    fn run_mode(&self) -> String;
}

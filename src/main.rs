use period_swing::error::SwingError;

fn main() {
    if let Err(err) = period_swing::run() {
        eprintln!("error: {err:#}");
        let code = err
            .downcast_ref::<SwingError>()
            .map(SwingError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

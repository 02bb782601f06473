fn main() {
    if let Err(err) = dot_spline_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

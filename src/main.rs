use utf16::{run, setup_logging, Args, CancelToken, USAGE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match Args::parse(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("{USAGE}");
            return Err(error.into());
        }
    };
    setup_logging(args.verbose)?;
    run(&args, &CancelToken::new())
}

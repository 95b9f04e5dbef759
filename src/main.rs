use anyhow::Result;
use cardrender::cli::App;

fn main() -> Result<()> {
    let args = cardrender::cli::Args::parse_args();
    let mut app = App::from_args(&args)?;

    app.run(args)
}

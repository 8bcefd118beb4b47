use clap::{CommandFactory, Parser};
use sample2info::commands::Sample2Info;

fn main() {
    // no arguments at all is a request for usage
    if std::env::args_os().len() <= 1 {
        eprint!("{}", Sample2Info::command().render_help());
        std::process::exit(0);
    }
    let cli = match Sample2Info::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    if let Err(err) = cli.run() {
        eprintln!("> Error! {err}");
        for cause in err.chain().skip(1) {
            eprintln!(" caused by {cause}")
        }
        std::process::exit(1);
    }
}

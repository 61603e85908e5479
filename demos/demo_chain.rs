use argchain::{param, parse_args, start_chain, ConfigError};

fn main() -> Result<(), ConfigError> {
    let global = start_chain()
        .add_param(param::flag(&["-h", "--help"], "help"))
        .add_param(param::enum_string(
            &["-l", "--log-level"],
            "log_level",
            &["debug", "info", "warn", "error"],
        )?);
    let chain = start_chain()
        .add_param(global)
        .add_param(param::string(&["-n", "--name"], "name"))
        .add_param(param::flag(&["-v", "--verified"], "verified"))
        .add_param(param::flag(&["-f", "--force"], "force"))
        .add_param(param::integer(&["-r", "--retries"], "retries"));

    let parsed = parse_args(&chain).extract();

    if parsed.flag("help") == Some(true) {
        println!("usage: demo_chain [-h] [-l LEVEL] [-n NAME] [-v] [-f] [-r RETRIES]");
        return Ok(());
    }

    for (name, value) in parsed.iter() {
        println!("{name}: {value}");
    }

    Ok(())
}

use argchain::{param, parse_args, start_chain, ListOptions};

fn main() {
    let chain = start_chain()
        .add_param(param::string(&["-o", "--output"], "output"))
        .add_param(param::flag(&["-q", "--quiet"], "quiet"))
        .add_param(param::positional_string("command"))
        .add_param(param::positional_string_list("files", ListOptions::eager()));

    let parsed = parse_args(&chain).extract();
    let command = parsed.string("command").unwrap_or("list");
    let files = parsed.strings("files").unwrap_or_default();

    if parsed.flag("quiet") != Some(true) {
        println!("{command}: {}", files.join(" "));
    }

    if let Some(output) = parsed.string("output") {
        println!("writing to {output}");
    }
}

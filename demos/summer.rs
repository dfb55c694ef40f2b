use flagparse::{ArgumentParser, CliOption, OptionType};

fn main() {
    let parser = ArgumentParser::new("Sums up the supplied items.")
        .add(
            CliOption::with_second("-i", "--item")
                .name("item")
                .option_type(OptionType::Integer)
                .repeatable(true)
                .help("An item to sum."),
        )
        .add(
            CliOption::new("--verbose")
                .takes_value(false)
                .help("Print each item as it is added."),
        )
        .terminal_width()
        .build()
        .unwrap_or_else(|error| {
            eprintln!("{error}");
            std::process::exit(1);
        });

    let namespace = parser.parse();
    let items: Vec<i64> = namespace.get_all("item").unwrap_or_default();
    let verbose = namespace.get_bool("verbose").unwrap_or_default();
    let mut sum: i64 = 0;

    for item in items {
        sum = sum.checked_add(item).unwrap_or_else(|| {
            eprintln!("Sum overflowed at item {item}.");
            std::process::exit(1);
        });

        if verbose {
            println!("+{item} = {sum}");
        }
    }

    println!("Sum: {sum}");
}

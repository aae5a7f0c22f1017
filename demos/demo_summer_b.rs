use optbind::{Opt, OptParser};

fn main() {
    let mut items: Vec<i32> = Vec::default();
    let mut verbose: bool = false;
    let mut parser = OptParser::new()
        .group("summer", |group| {
            group
                .add(
                    Opt::new(&mut items, "items")
                        .gloss("The items to sum.")
                        .required(),
                )
                .add(Opt::new(&mut verbose, "verbose").gloss("Print every partial sum."))
        })
        .build();

    if !parser.parse() {
        std::process::exit(1);
    }

    drop(parser);
    let mut sum = 0;

    for item in items {
        sum += item;

        if verbose {
            println!("+{item} -> {sum}");
        }
    }

    println!("Sum: {sum}");
}

use optbind::derive::*;
use optbind::prelude::*;

#[derive(Debug, Default, Options)]
#[opt(group = "summer")]
struct Summer {
    #[opt(gloss = "The items to sum.", required)]
    items: Vec<i32>,
    #[opt(gloss = "Print every partial sum.")]
    verbose: bool,
}

fn main() {
    let summer = Summer::parse_args();
    let mut sum = 0;

    for item in summer.items {
        sum += item;

        if summer.verbose {
            println!("+{item} -> {sum}");
        }
    }

    println!("Sum: {sum}");
}

use agora_ecmul::parse::parse_vectors;
use structopt::StructOpt;

use std::error::Error;
use std::path::PathBuf;

#[derive(StructOpt)]
struct Opt {
    #[structopt(help = "csv file of test vectors", default_value = "tests/testcases.csv")]
    vectors: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let csv = std::fs::read_to_string(&opt.vectors)?;
    let vectors = parse_vectors(&csv)?;

    let mut failed = 0;
    for (i, vector) in vectors.iter().enumerate() {
        if let Err(msg) = vector.check() {
            println!("vector {} failed: {}", i, msg);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} vectors failed", failed, vectors.len()).into());
    }
    println!("{} vectors OK", vectors.len());
    Ok(())
}

use std::convert::TryFrom;
use std::env;
use std::fs::File;
use std::io;
use std::io::{stdin, BufReader};
use std::process::exit;
use treedom::bag_tree::BagTree;
use treedom::io::NiceTdReader;
use treedom::log::build_logger;
use treedom::solver::SolverBuilder;

fn main() -> io::Result<()> {
    build_logger();

    let mut tree: BagTree = match env::args().nth(1) {
        Some(path) => {
            let file = File::open(path)?;
            BagTree::try_from(NiceTdReader(BufReader::new(file)))?
        }
        None => {
            let buffer = stdin();
            let reader = NiceTdReader(buffer.lock());
            BagTree::try_from(reader)?
        }
    };

    let solver = SolverBuilder::new().build();
    match solver.solve(&mut tree) {
        Ok(size) => println!("{}", size),
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
    Ok(())
}

use crate::bag::BagType;
use crate::bag_tree::BagTree;
use std::convert::TryFrom;
use std::io::ErrorKind;
use std::io::{BufRead, Error};

// Reads the producer's line format. The first line describes the root, which
// is always the empty forget bag 0 and is synthesized rather than parsed;
// every further line is
//
//   (N,{v1,v2,...}) T [(P,...)...] [(u1,v1),(u2,v2),...]
//
// with N the bag number, T one of f/i/j/l, P the parent number and an
// optional introduce-edge list.
pub struct NiceTdReader<T: BufRead>(pub T);

type BagRecord = (usize, BagType, usize, Vec<usize>, Vec<(usize, usize)>);

impl<T: BufRead> TryFrom<NiceTdReader<T>> for BagTree {
    type Error = Error;

    fn try_from(reader: NiceTdReader<T>) -> Result<Self, Self::Error> {
        let reader = reader.0;
        let mut records: Vec<BagRecord> = Vec::new();
        let mut saw_root = false;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !saw_root {
                saw_root = true;
                continue;
            }
            records.push(parse_line(line)?);
        }
        if !saw_root {
            return Err(invalid_input("no bags in input".to_string()));
        }

        records.sort_by_key(|r| r.0);
        let mut tree = BagTree::new();
        tree.add_bag(BagType::Forget, None, Vec::new(), Vec::new());
        for (number, bag_type, parent, vertices, edges) in records {
            if number != tree.len() {
                return Err(invalid_input(format!(
                    "bag numbers are not contiguous at {}",
                    number
                )));
            }
            tree.add_bag(bag_type, Some(parent), vertices, edges);
        }
        Ok(tree)
    }
}

fn parse_line(line: &str) -> Result<BagRecord, Error> {
    let mut words = line.split_whitespace();
    let header = words
        .next()
        .ok_or_else(|| invalid_input(format!("empty bag line: {}", line)))?;
    let (number, vertices) = parse_header(header)?;
    let bag_type = words
        .next()
        .ok_or_else(|| invalid_input(format!("missing bag type: {}", line)))
        .and_then(parse_bag_type)?;
    let parent = words
        .next()
        .ok_or_else(|| invalid_input(format!("missing parent group: {}", line)))
        .and_then(parse_parent)?;
    let edges = match words.next() {
        Some(word) => parse_edges(word)?,
        None => Vec::new(),
    };
    Ok((number, bag_type, parent, vertices, edges))
}

fn parse_header(word: &str) -> Result<(usize, Vec<usize>), Error> {
    let inner = word
        .strip_prefix('(')
        .and_then(|w| w.strip_suffix(')'))
        .ok_or_else(|| invalid_input(format!("malformed bag header: {}", word)))?;
    let comma = inner
        .find(',')
        .ok_or_else(|| invalid_input(format!("malformed bag header: {}", word)))?;
    let number = parse_number(&inner[..comma])?;
    let set = inner[comma + 1..]
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| invalid_input(format!("malformed vertex set: {}", word)))?;
    let vertices = if set.is_empty() {
        Vec::new()
    } else {
        set.split(',').map(parse_number).collect::<Result<_, _>>()?
    };
    Ok((number, vertices))
}

fn parse_bag_type(word: &str) -> Result<BagType, Error> {
    match word {
        "f" => Ok(BagType::Forget),
        "i" => Ok(BagType::IntroduceVertex),
        "j" => Ok(BagType::Join),
        "l" => Ok(BagType::Leaf),
        _ => Err(invalid_input(format!("unknown bag type: {}", word))),
    }
}

fn parse_parent(word: &str) -> Result<usize, Error> {
    let rest = word
        .strip_prefix("[(")
        .ok_or_else(|| invalid_input(format!("malformed parent group: {}", word)))?;
    let digits: &str = rest
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");
    if digits.is_empty() {
        return Err(invalid_input(format!("malformed parent group: {}", word)));
    }
    parse_number(digits)
}

fn parse_edges(word: &str) -> Result<Vec<(usize, usize)>, Error> {
    let inner = word
        .strip_prefix('[')
        .and_then(|w| w.strip_suffix(']'))
        .ok_or_else(|| invalid_input(format!("malformed edge list: {}", word)))?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    let mut edges = Vec::new();
    for pair in inner.split("),(") {
        let pair = pair.trim_start_matches('(').trim_end_matches(')');
        let comma = pair
            .find(',')
            .ok_or_else(|| invalid_input(format!("malformed edge: {}", pair)))?;
        edges.push((
            parse_number(&pair[..comma])?,
            parse_number(&pair[comma + 1..])?,
        ));
    }
    Ok(edges)
}

fn parse_number(word: &str) -> Result<usize, Error> {
    word.parse::<usize>()
        .map_err(|_| invalid_input(format!("invalid number: {}", word)))
}

fn invalid_input(message: String) -> Error {
    Error::new(ErrorKind::InvalidInput, message)
}

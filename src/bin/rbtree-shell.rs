// Reads keys from stdin, inserts each one into a red-black tree and prints
// the tree after every insertion.
//
//     $ echo "i j k g e f h d a b c" | rbtree-shell
//     $ rbtree-shell --numeric -v

use std::env;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use redblack::{render, RbTree};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const USAGE: &str = "usage: rbtree-shell [--numeric] [-v]...

Reads whitespace-separated keys from stdin until end of input. Every key is
inserted and the tree is printed sideways, root at the left margin.

  -n, --numeric   parse keys as integers and order them numerically
                  (default: keys are text, ordered lexicographically)
  -v, --verbose   log more; repeat for rebalancing traces
  -h, --help      print this message";

struct Options {
    numeric: bool,
    level: LevelFilter,
}

fn parse_args<I: Iterator<Item = String>>(args: I) -> Result<Option<Options>> {
    let mut opts = Options { numeric: false, level: LevelFilter::Warn };
    for arg in args {
        match arg.as_str() {
            "-n" | "--numeric" => opts.numeric = true,
            "-v" | "--verbose" => {
                opts.level = match opts.level {
                    LevelFilter::Warn => LevelFilter::Debug,
                    _ => LevelFilter::Trace,
                }
            }
            "-h" | "--help" => return Ok(None),
            other => bail!("unknown argument `{}`\n\n{}", other, USAGE),
        }
    }
    Ok(Some(opts))
}

fn run<K, R, W>(input: R, mut out: W) -> Result<()>
    where K: Ord + Display + FromStr, R: BufRead, W: Write {
    let mut tree = RbTree::new();
    writeln!(out, "enter keys:")?;

    for line in input.lines() {
        let line = line.context("failed to read from stdin")?;
        for token in line.split_whitespace() {
            let key = match token.parse::<K>() {
                Ok(key) => key,
                Err(_) => {
                    warn!("skipping `{}`: not a valid key", token);
                    continue;
                }
            };
            if tree.insert(key, ()).is_some() {
                info!("`{}` was already present", token);
            }
            out.write_all(render::tree_to_string(&tree).as_bytes())?;
        }
        out.flush()?;
    }

    info!("end of input, {} distinct keys", tree.len());
    Ok(())
}

fn main() -> Result<()> {
    let opts = match parse_args(env::args().skip(1))? {
        Some(opts) => opts,
        None => {
            println!("{}", USAGE);
            return Ok(());
        }
    };
    TermLogger::init(opts.level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("failed to initialize logging")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    if opts.numeric {
        run::<i64, _, _>(stdin.lock(), stdout.lock())
    } else {
        run::<String, _, _>(stdin.lock(), stdout.lock())
    }
}

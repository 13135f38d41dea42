use std::collections::BTreeSet;
use std::env;
use std::io;
use std::process;

use ucdxml::{Detail, Registry, Result, Ucd, UcdError, UcdFile, UnicodeVersion, XmlOptions};

fn usage(program: &str) {
    eprintln!("Usage: {} <ucd-dir> <version> [--xml <out.xml>] [--grouped] [--explode <N>]", program);
    eprintln!("           [--files <File,File,...>] [--stats]");
    eprintln!("       {} --diff <old.xml> <new.xml> [--details <0|1|2>]", program);
}

/// Value following `flag`, if the flag is present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<Result<&'a str>> {
    let index = args.iter().position(|arg| arg == flag)?;
    Some(
        args.get(index + 1)
            .map(String::as_str)
            .ok_or_else(|| UcdError::InvalidFormat(format!("{} flag requires an argument", flag))),
    )
}

fn parse_files(list: &str) -> Result<BTreeSet<UcdFile>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(UcdFile::try_from)
        .collect()
}

fn run_diff(args: &[String]) -> Result<()> {
    let (Some(old_path), Some(new_path)) = (args.get(2), args.get(3)) else {
        return Err(UcdError::InvalidFormat("--diff needs <old.xml> <new.xml>".to_string()));
    };
    let detail = match flag_value(args, "--details") {
        Some(value) => {
            let level: u8 = value?
                .parse()
                .map_err(|e| UcdError::InvalidFormat(format!("Invalid --details value: {}", e)))?;
            Detail::try_from(level)?
        }
        None => Detail::default(),
    };

    let mut registry = Registry::new();
    let older = Ucd::from_xml_file(&mut registry, old_path)?;
    let newer = Ucd::from_xml_file(&mut registry, new_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let diff = newer.diff(&older, &registry, detail, &mut out)?;
    if diff.is_identical() {
        eprintln!("No differences.");
    }
    Ok(())
}

fn run_load(args: &[String]) -> Result<()> {
    let dir = &args[1];
    let version: UnicodeVersion = args[2].parse()?;
    let files = match flag_value(args, "--files") {
        Some(list) => parse_files(list?)?,
        None => UcdFile::all(),
    };
    let explode_limit = match flag_value(args, "--explode") {
        Some(value) => value?
            .parse()
            .map_err(|e| UcdError::InvalidFormat(format!("Invalid --explode value: {}", e)))?,
        None => 0,
    };
    let options = XmlOptions {
        explode_limit,
        grouped: args.iter().any(|arg| arg == "--grouped"),
    };

    println!("Loading UCD {} from {}", version, dir);
    println!("{}", "=".repeat(60));

    let mut registry = Registry::new();
    let ucd = Ucd::from_ucd(&mut registry, dir, version, &files)?;

    println!("\n{}", "=".repeat(60));
    println!("SUCCESS! Loading completed.");
    println!("{}", "=".repeat(60));
    println!("\nDatabase Information:");
    println!("  Description: {}", ucd.description);
    println!("  Groups: {}", ucd.repertoire.group_count());
    println!("  Blocks: {}", ucd.blocks.len());
    println!("  Named sequences: {}", ucd.named_sequences.len());

    if args.iter().any(|arg| arg == "--stats") {
        println!("\n{}", ucd.stats());
    }

    if let Some(path) = flag_value(args, "--xml") {
        let path = path?;
        ucd.to_xml_file(&registry, path, &options)?;
        println!("\nWrote {}{}", path, if options.grouped { " (grouped)" } else { "" });
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ucdxml");

    let result = if args.get(1).map(String::as_str) == Some("--diff") {
        run_diff(&args)
    } else if args.len() >= 3 {
        run_load(&args)
    } else {
        usage(program);
        process::exit(1);
    };

    if let Err(e) = result {
        eprintln!("\nERROR: {}", e);
        process::exit(1);
    }
}

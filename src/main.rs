//! # logdump - Main Entry Point
//!
//! Session flow: decode the log header, build the static resolution
//! context (string table + section base via the platform's inspection
//! tools), validate the location decoder if the header calls for one, then
//! stream entries until end-of-stream.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufReader;

use logdump::cli::Args;
use logdump::decoder::{EntryDecoder, Location};
use logdump::domain::DecodeError;
use logdump::header::{LocScheme, LogHeader, Platform};
use logdump::locdec::LocDecoder;
use logdump::resolver::AddressResolver;
use logdump::section::{parse_section_base, parse_section_offset, StringTable};
use logdump::toolchain::Toolchain;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    let args = Args::parse();
    init_logging(&args);
    std::process::exit(match run(&args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

/// `--verbose` maps to info-level, `--debug` to debug-level; `RUST_LOG`
/// still overrides both.
fn init_logging(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let file = File::open(&args.log_file)
        .with_context(|| format!("Failed to open log file {}", args.log_file.display()))?;
    let mut reader = BufReader::new(file);

    let Some(header) = LogHeader::read_from(&mut reader)? else {
        // Shorter than a header: an empty log, decoded cleanly.
        println!("decoded 0 entries");
        return Ok(());
    };
    println!("index={} runtime_base=0x{:x}", header.writer_index, header.runtime_base);
    info!("platform={:?} loc_scheme={:?}", header.platform, header.loc_scheme);

    // ── Static resolution context ───────────────────────────────────────
    let toolchain = Toolchain::for_platform(header.platform)?;

    let string_dump = toolchain.string_dump(&args.binary)?;
    let (table, nlines) = StringTable::parse(&string_dump);
    info!("string table: {} entries from {} dump lines", table.len(), nlines);

    let resolver = build_resolver(&toolchain, args, &header)?;
    info!("resolver: {resolver:x?}");

    // A missing location decoder is fatal before any entries are read.
    let loc_decoder = match header.loc_scheme {
        LocScheme::Default => Some(LocDecoder::locate(&args.binary, args.loc_binary.clone())?),
        LocScheme::None | LocScheme::ElfEncoded => None,
    };

    // ── Entry stream ────────────────────────────────────────────────────
    let mut decoder =
        EntryDecoder::new(reader, resolver, table, header.loc_scheme, loc_decoder);
    let total = decoder.decode_all(|entry| match &entry.location {
        Location::None => println!(
            "tid={} '{}' arg1={} arg2={}",
            entry.tid, entry.message, entry.arg1, entry.arg2
        ),
        location => println!(
            "tid={} {} '{}' arg1={} arg2={}",
            entry.tid, location, entry.message, entry.arg1, entry.arg2
        ),
    })?;

    println!("decoded {total} entries");
    Ok(())
}

/// Pick the address-translation variant for the log's platform and feed it
/// the right section base.
fn build_resolver(
    toolchain: &Toolchain,
    args: &Args,
    header: &LogHeader,
) -> Result<AddressResolver, DecodeError> {
    match header.platform {
        Platform::Linux => {
            let hex_dump = toolchain.hex_dump(&args.binary)?;
            let section_base =
                parse_section_base(&hex_dump).ok_or(DecodeError::SectionBaseNotFound)?;
            Ok(AddressResolver::Linux { runtime_base: header.runtime_base, section_base })
        }
        Platform::MacOs => {
            // The hex-dump address does not line up with Mach-O pointer
            // math; the sizing tool's file offset does.
            let listing = toolchain.size_listing(&args.binary)?;
            let section_offset = parse_section_offset(&listing, toolchain.section())
                .ok_or_else(|| DecodeError::SectionOffsetNotFound(toolchain.section().into()))?;
            Ok(AddressResolver::MacOs { runtime_base: header.runtime_base, section_offset })
        }
    }
}

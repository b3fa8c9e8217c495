use anyhow::{Context, Result, bail};
use clap::Parser;
use elf_size::{ElfFile, ElfSize, elf_size};
use log::LevelFilter;
use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Parser)]
#[command(name = "elf-size", version)]
/// Print where the ELF image at the start of each file ends
struct Args {
    /// Files to inspect
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Also print class, byte order and both candidate ends
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    detail: bool,
    /// Write the data appended after the ELF image to this file
    #[arg(short, long)]
    payload: Option<PathBuf>,
    /// Write only the ELF image to this file
    #[arg(short, long)]
    strip: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

/// Copies `len` bytes starting at `offset` in `src` into a new file at `out`.
fn copy_range(src: &Path, offset: u64, len: u64, out: &Path) -> Result<()> {
    let mut input = File::open(src).with_context(|| format!("Cannot open {}", src.display()))?;
    input.seek(SeekFrom::Start(offset))?;
    let mut output =
        File::create(out).with_context(|| format!("Cannot create {}", out.display()))?;
    let copied = io::copy(&mut (&mut input).take(len), &mut output)?;
    if copied != len {
        bail!("{} ended after {} of {} bytes", src.display(), copied, len);
    }
    log::debug!("wrote {} bytes to {}", copied, out.display());
    Ok(())
}

fn print_size(
    out: &mut impl Write,
    path: &Path,
    size: &ElfSize,
    file_len: u64,
    args: &Args,
) -> Result<()> {
    if args.files.len() > 1 {
        writeln!(out, "{}\t{}", size.size(), path.display())?;
    } else {
        writeln!(out, "{}", size.size())?;
    }
    if args.detail {
        writeln!(out, "  class:            {}", size.class())?;
        writeln!(out, "  byte order:       {}", size.endian())?;
        writeln!(out, "  sht end:          {:#x}", size.sht_end())?;
        writeln!(out, "  last section end: {:#x}", size.last_section_end())?;
        writeln!(out, "  trailing bytes:   {}", size.trailing_len(file_len))?;
    }
    Ok(())
}

fn process(path: &Path, args: &Args) -> Result<()> {
    let file = ElfFile::from_path(path)?;
    let file_len = file.len()?;
    let size = elf_size(file)?;
    if size.size() > file_len {
        log::warn!(
            "{}: ELF image ends at {:#x}, past the end of the file ({:#x})",
            path.display(),
            size.size(),
            file_len
        );
    }
    print_size(&mut io::stdout().lock(), path, &size, file_len, args)?;

    if let Some(out) = &args.strip {
        copy_range(path, 0, size.size().min(file_len), out)?;
    }
    if let Some(out) = &args.payload {
        copy_range(path, size.size(), size.trailing_len(file_len), out)?;
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logger(args.verbose);

    if args.files.len() > 1 && (args.payload.is_some() || args.strip.is_some()) {
        bail!("--payload and --strip take a single input file");
    }

    let mut status = ExitCode::SUCCESS;
    for path in &args.files {
        if let Err(err) = process(path, &args) {
            eprintln!("{err:#}");
            status = ExitCode::FAILURE;
        }
    }
    Ok(status)
}

/*

eutile: render Euclidean uniform tilings to image files.

usage:
  eutile TILINGFILE...
  eutile --preset NAME
  eutile --all-presets
  eutile --list

 */

use std::path::Path;

#[macro_use]
extern crate error_chain;

use eutile_rs::errors::*;
use eutile_rs::pattern::{self, TilingJob};
use eutile_rs::{presets, render, EuclideanTiling};

//////////////////////////////////////////////////////////////////////

fn usage(prog: &str) -> ! {
    eprintln!("usage: {:} TILINGFILE...", prog);
    eprintln!("       {:} --preset NAME", prog);
    eprintln!("       {:} --all-presets", prog);
    eprintln!("       {:} --list", prog);
    std::process::exit(1);
}

fn run_job(label: &str, job: &TilingJob) -> Result<()> {

    let tiling = EuclideanTiling::new(job.spec)
        .chain_err(|| format!("setting up {:}", label))?;

    let count = render::render(&tiling, &job.settings, &job.output)
        .chain_err(|| format!("rendering {:}", label))?;

    println!("wrote {:} ({:} tiles)", job.output.display(), count);

    Ok(())

}

fn run() -> Result<()> {

    env_logger::builder().init();

    let args: Vec<String> = std::env::args().collect();

    let prog = Path::new(&args[0]).file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("eutile")
        .to_string();

    if args.len() < 2 {
        usage(&prog);
    }

    match args[1].as_str() {

        "--list" => {
            for name in presets::names() {
                println!("{:}", name);
            }
        }

        "--preset" => {

            if args.len() != 3 {
                usage(&prog);
            }

            run_job(&args[2], &presets::job(&args[2])?)?;

        }

        "--all-presets" => {

            if args.len() != 2 {
                usage(&prog);
            }

            for name in presets::names() {
                run_job(name, &presets::job(name)?)?;
            }

        }

        flag if flag.starts_with("--") => {
            usage(&prog);
        }

        _ => {

            for filename in &args[1..] {
                let job = pattern::parse_file(filename)?;
                run_job(filename, &job)?;
            }

        }

    }

    Ok(())

}

quick_main!(run);

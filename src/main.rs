use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use log::info;

use crate::{
    config::load_config,
    context::{Context, INDEX_FILE},
    generator::generate,
    listing::{load_index, render_listing},
    renderer::CmarkRenderer,
};

mod config;
mod context;
mod date;
mod front_matter;
mod generator;
mod listing;
mod metadata;
mod renderer;
mod template;

fn path_arg(
    id: &'static str,
    long: &'static str,
    help: &'static str,
    default: &'static str,
) -> Arg {
    Arg::new(id)
        .long(long)
        .help(help)
        .value_parser(value_parser!(PathBuf))
        .default_value(default)
}

fn cli() -> Command {
    command!()
        .args([
            path_arg(
                "config",
                "config",
                "Site configuration file (JSON). Defaults apply when it does not exist.",
                "site.json",
            ),
            path_arg("posts_dir", "posts", "Directory of Markdown posts", "blogs"),
            path_arg(
                "source_dir",
                "source",
                "Directory holding the static pages, styles.css and script.js",
                "src",
            ),
            path_arg(
                "assets_dir",
                "assets",
                "Directory of assets. Contents will be copied as it is.",
                "assets",
            ),
            path_arg("out_dir", "out", "Directory path of output", "dist").short('o'),
            Arg::new("clean")
                .long("clean")
                .help("Remove the output directory before building")
                .action(ArgAction::SetTrue),
            Arg::new("strict_dates")
                .long("strict-dates")
                .help("Fail the build when a post has no date")
                .action(ArgAction::SetTrue),
        ])
        .subcommand(
            Command::new("list").about("Print the post list the browser renders from the index"),
        )
}

fn path_of<'a>(matches: &'a ArgMatches, id: &str) -> anyhow::Result<&'a PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .with_context(|| format!("missing argument {id}"))
}

fn build(matches: &ArgMatches) -> anyhow::Result<()> {
    let out_dir = path_of(matches, "out_dir")?;
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if out_dir exists, it must be directory.");
    }

    let mut site = load_config(path_of(matches, "config")?)?;
    if matches.get_flag("strict_dates") {
        site.require_dates = true;
    }
    let renderer = CmarkRenderer::new(&site.markdown);

    let ctx = Context::new(
        path_of(matches, "posts_dir")?.to_owned(),
        path_of(matches, "source_dir")?.to_owned(),
        path_of(matches, "assets_dir")?.to_owned(),
        out_dir.to_owned(),
        site,
    );

    if matches.get_flag("clean") {
        fs_extra::dir::remove(&ctx.out_dir)
            .with_context(|| format!("while removing {:?}", ctx.out_dir))?;
    }

    info!("Building static site...");
    let report = generate(&ctx, &renderer, chrono::Utc::now()).context("Build failed")?;
    info!(
        "✓ Copied {} static pages{}",
        report.static_pages,
        if report.assets_copied { " and assets" } else { "" }
    );
    info!("✓ Generated {} blog posts", report.posts.len());
    info!("Build complete! Site generated in {out_dir:?}");

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("list", _)) => {
            let index_path = path_of(&matches, "out_dir")?.join(INDEX_FILE);
            println!("{}", render_listing(load_index(&index_path)));
            Ok(())
        }
        _ => build(&matches),
    }
}

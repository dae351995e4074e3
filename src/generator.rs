use std::{
    borrow::Cow,
    fs::{self, OpenOptions},
    io::{BufWriter, ErrorKind, Write},
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use fs_extra::dir::CopyOptions;
use log::{debug, info, warn};

use crate::{
    context::{Context, CLIENT_SCRIPT, STYLESHEET},
    front_matter,
    metadata::{build_metadata, PostMetadata},
    renderer::MarkdownRenderer,
    template::render_post_page,
};

pub(crate) use self::data::BuildReport;
use self::{
    data::{PostSource, Step},
    utils::{slug_of, sort_posts},
};

mod data;
mod utils;


fn ensure_directories(ctx: &Context) -> anyhow::Result<()> {
    for dir in [ctx.posts_out_dir(), ctx.assets_out_dir()] {
        fs::create_dir_all(&dir).with_context(|| format!("while creating {dir:?}"))?;
    }
    Ok(())
}

fn copy_static_pages(ctx: &Context) -> Step<usize> {
    if ctx.site.static_pages.is_empty() {
        return Step::Skipped("no static pages configured".to_string());
    }

    let mut copied = 0;
    for page in ctx.site.static_pages.iter() {
        match fs::copy(ctx.source_dir.join(page), ctx.out_dir.join(page)) {
            Ok(_) => copied += 1,
            Err(e) if e.kind() == ErrorKind::NotFound => info!("Skipping {page}: not found"),
            Err(e) => warn!("Skipping {page}: {e}"),
        }
    }
    Step::Done(copied)
}

fn copy_required_files(ctx: &Context) -> Step<()> {
    for file in [STYLESHEET, CLIENT_SCRIPT] {
        let src = ctx.source_dir.join(file);
        if let Err(e) = fs::copy(&src, ctx.out_dir.join(file)) {
            return Step::Fatal(anyhow::Error::new(e).context(format!("while copying {src:?}")));
        }
    }
    Step::Done(())
}

fn copy_assets(ctx: &Context) -> Step<()> {
    if !ctx.assets_dir.is_dir() {
        return Step::Skipped("No assets to copy or assets directory not found".to_string());
    }

    let mut cp_opts = CopyOptions::new();
    cp_opts.copy_inside = true;
    cp_opts.content_only = true;
    cp_opts.overwrite = true;
    match fs_extra::dir::copy(&ctx.assets_dir, ctx.assets_out_dir(), &cp_opts) {
        Ok(bytes) => {
            debug!("copied {bytes} bytes of assets");
            Step::Done(())
        }
        Err(e) => {
            warn!("Copying assets from {:?} failed: {e}", ctx.assets_dir);
            Step::Skipped(format!("assets could not be copied: {e}"))
        }
    }
}

fn discover_posts(ctx: &Context) -> Step<Vec<PostSource>> {
    let entries = match fs::read_dir(&ctx.posts_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Step::Skipped("No blog posts found or blogs directory not found".to_string())
        }
        Err(e) => {
            warn!("Reading {:?} failed: {e}", ctx.posts_dir);
            return Step::Skipped(format!("posts directory unreadable: {e}"));
        }
    };

    let mut sources = vec![];
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {:?}: {e}", ctx.posts_dir);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(slug) = slug_of(&entry.file_name().to_string_lossy()) {
            sources.push(PostSource {
                slug: slug.to_string(),
                path,
            });
        }
    }
    // read_dir order is platform dependent
    sources.sort_by(|a, b| a.slug.cmp(&b.slug));

    Step::Done(sources)
}

fn generate_post(
    ctx: &Context,
    renderer: &dyn MarkdownRenderer,
    source: &PostSource,
    now: DateTime<Utc>,
) -> anyhow::Result<PostMetadata> {
    let bytes =
        fs::read(&source.path).with_context(|| format!("while reading {:?}", source.path))?;
    let raw = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = raw {
        warn!("{:?} is not valid UTF-8; invalid bytes were replaced", source.path);
    }
    let document = front_matter::parse(&raw)
        .with_context(|| format!("while parsing front-matter of {:?}", source.path))?;
    let content = renderer.render(&document.body);

    let post = build_metadata(
        &source.slug,
        &document.attributes,
        &document.body,
        content,
        &ctx.site,
        now,
    )
    .with_context(|| format!("while preprocessing {:?}", source.path))?;

    let out_path = ctx.posts_out_dir().join(format!("{}.html", source.slug));
    fs::write(&out_path, render_post_page(&ctx.site, &post))
        .with_context(|| format!("while generating {out_path:?}"))?;
    debug!("wrote {out_path:?}");

    Ok(post)
}

fn write_index(ctx: &Context, posts: &[PostMetadata]) -> anyhow::Result<()> {
    let index_path = ctx.index_path();
    let fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&index_path)
        .with_context(|| format!("while opening {index_path:?}"))?;
    let mut writer = BufWriter::new(fd);
    serde_json::to_writer_pretty(&mut writer, posts)
        .with_context(|| format!("while writing {index_path:?}"))?;
    writer.flush()?;

    Ok(())
}

/// Builds the whole site into `ctx.out_dir`. `now` is the timestamp given to posts without a date.
pub(crate) fn generate(
    ctx: &Context,
    renderer: &dyn MarkdownRenderer,
    now: DateTime<Utc>,
) -> anyhow::Result<BuildReport> {
    ensure_directories(ctx)?;
    info!("✓ Directories created");

    let static_pages = copy_static_pages(ctx).or_skip(0)?;
    copy_required_files(ctx).or_skip(())?;
    let assets_copied = copy_assets(ctx).map(|()| true).or_skip(false)?;
    info!("✓ Static files copied");

    let sources = discover_posts(ctx).or_skip(vec![])?;

    let mut posts = Vec::with_capacity(sources.len());
    for source in sources.iter() {
        posts.push(generate_post(ctx, renderer, source, now)?);
    }

    posts.sort_by(sort_posts);
    write_index(ctx, &posts)?;

    Ok(BuildReport {
        static_pages,
        assets_copied,
        posts,
    })
}

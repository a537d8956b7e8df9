//! Subcommand handlers. Each returns the JSON document `main` prints.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use jotimap_core::{
    convex_hull, is_within_netherlands, parse_coord_input_detailed, render_overlay, rd_to_wgs84,
    AppConfig, GeoJsonRenderer, Point, TagAssignments,
};
use jotimap_subscriptions::{Endpoints, SubscriptionsClient, SubscriptionsSource};
use serde_json::{json, Value};

use crate::SourceArgs;

pub(crate) fn run_convert(x: f64, y: f64) -> Value {
    let point = rd_to_wgs84(x, y);
    json!({
        "rd": {"x": x, "y": y},
        "point": point,
        "within_netherlands": is_within_netherlands(&point),
    })
}

pub(crate) fn run_parse(input: &str) -> anyhow::Result<Value> {
    let parsed = parse_coord_input_detailed(input)
        .with_context(|| format!("could not read '{input}' as a coordinate pair"))?;

    let mut value = serde_json::to_value(parsed)?;
    value["within_netherlands"] = json!(is_within_netherlands(&parsed.point));
    Ok(value)
}

pub(crate) fn run_hull(file: &Path) -> anyhow::Result<Value> {
    let text = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read points from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?
    };
    hull_from_json(&text)
}

pub(crate) fn hull_from_json(text: &str) -> anyhow::Result<Value> {
    let points: Vec<Point> =
        serde_json::from_str(text).context("expected a JSON array of {lat, lng} points")?;
    let hull = convex_hull(&points);
    let polygon = hull.len() >= jotimap_core::territory::MIN_POLYGON_POINTS;
    Ok(json!({"hull": hull, "polygon": polygon}))
}

pub(crate) fn resolve_source(
    args: &SourceArgs,
    default_ts: &str,
) -> anyhow::Result<SubscriptionsSource> {
    let archive = (args.archive || args.ts.is_some()).then_some("1");
    Ok(SubscriptionsSource::from_query(
        archive,
        args.ts.as_deref(),
        default_ts,
    )?)
}

fn build_client(config: &AppConfig) -> anyhow::Result<SubscriptionsClient> {
    let client = SubscriptionsClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .context("failed to build subscriptions client")?;
    Ok(client.with_endpoints(Endpoints {
        live_url: config.upstream_url.clone(),
        archive_base_url: config.archive_base_url.clone(),
    }))
}

pub(crate) async fn run_groups(config: &AppConfig, args: &SourceArgs) -> anyhow::Result<Value> {
    let source = resolve_source(args, &config.archive_timestamp)?;
    let groups = build_client(config)?.fetch_groups(&source).await?;
    tracing::info!(count = groups.len(), archive = source.is_archive(), "fetched groups");
    Ok(serde_json::to_value(groups)?)
}

pub(crate) async fn run_overlay(
    config: &AppConfig,
    args: &SourceArgs,
    tags_path: Option<&Path>,
) -> anyhow::Result<Value> {
    let tags = match tags_path.or(config.tags_path.as_deref()) {
        Some(path) => jotimap_core::load_tags(path)?,
        None => TagAssignments::new(),
    };

    let source = resolve_source(args, &config.archive_timestamp)?;
    let groups = build_client(config)?.fetch_groups(&source).await?;
    Ok(render_overlay(GeoJsonRenderer::new(), &groups, &tags))
}

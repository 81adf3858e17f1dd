//! Graph visualization page.
//!
//! Emits a single self-contained HTML file: the graph data embedded as
//! JSON plus a small canvas force-directed renderer with a legend and
//! stats panel. The renderer is a thin consumer of the embedded data and
//! can be swapped out without touching the core; nothing in the core
//! depends on it.
//!
//! Edge orientation: every arrow points from the referencing file toward
//! the file it references, matching the forward map.

use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::core::ScanReport;

pub struct GraphPageFormatter;

impl GraphPageFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, report: &ScanReport, output_path: &Path) -> Result<()> {
        let page = self.format_page(report)?;
        fs::write(output_path, page)
            .with_context(|| format!("failed to write graph page to {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_page(&self, report: &ScanReport) -> Result<String> {
        let mut nodes = Vec::new();
        for (path, file_type) in &report.file_types {
            nodes.push(json!({
                "path": path,
                "type": file_type,
                "isOrphan": report.orphans.contains(path),
                "isEntryPoint": report.entry_points.contains(path),
                "missing": false,
            }));
        }
        // Missing targets still get a node so broken edges have somewhere
        // to point
        let missing_paths: std::collections::BTreeSet<&str> = report
            .missing
            .iter()
            .map(|reference| reference.missing.as_str())
            .filter(|path| !report.file_types.contains_key(*path))
            .collect();
        for path in missing_paths {
            nodes.push(json!({
                "path": path,
                "type": "unknown",
                "isOrphan": false,
                "isEntryPoint": false,
                "missing": true,
            }));
        }

        let mut edges = Vec::new();
        for (from, deps) in report.graph.sorted_forward() {
            for to in deps {
                edges.push(json!({ "from": from, "to": to }));
            }
        }

        let data = json!({
            "generatedAt": report.generated_at,
            "root": report.root,
            "stats": report.stats,
            "nodes": nodes,
            "edges": edges,
        });

        // `</` must not appear inside the inline <script> block
        let embedded = serde_json::to_string(&data)?.replace("</", "<\\/");
        Ok(PAGE_TEMPLATE.replace("__SITEGRAPH_DATA__", &embedded))
    }
}

impl Default for GraphPageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>sitegraph - dependency graph</title>
<style>
  body { margin: 0; background: #111; color: #ddd; font: 13px sans-serif; }
  #panel { position: fixed; top: 10px; left: 10px; background: rgba(20,20,20,0.9);
           border: 1px solid #444; border-radius: 4px; padding: 10px 14px; }
  #panel h1 { font-size: 14px; margin: 0 0 6px 0; }
  .swatch { display: inline-block; width: 10px; height: 10px; border-radius: 5px;
            margin-right: 6px; }
  canvas { display: block; }
</style>
</head>
<body>
<div id="panel">
  <h1>Dependency graph</h1>
  <div id="stats"></div>
  <div style="margin-top:6px">
    <div><span class="swatch" style="background:#4e9af1"></span>HTML</div>
    <div><span class="swatch" style="background:#f1c74e"></span>JS</div>
    <div><span class="swatch" style="background:#6fd08c"></span>CSS</div>
    <div><span class="swatch" style="background:#f14e4e"></span>missing target</div>
    <div><span class="swatch" style="background:#b36ff1"></span>orphan</div>
    <div><span class="swatch" style="border:1px solid #fff;background:none"></span>entry point (ring)</div>
  </div>
  <div style="margin-top:6px;color:#888">arrow: referencing file &#8594; referenced file</div>
</div>
<canvas id="view"></canvas>
<script>
const GRAPH = __SITEGRAPH_DATA__;
const canvas = document.getElementById('view');
const ctx = canvas.getContext('2d');
canvas.width = window.innerWidth;
canvas.height = window.innerHeight;

const COLORS = { html: '#4e9af1', js: '#f1c74e', css: '#6fd08c', unknown: '#f14e4e' };
const statsEl = document.getElementById('stats');
statsEl.textContent = GRAPH.nodes.length + ' nodes, ' + GRAPH.edges.length +
  ' edges, ' + GRAPH.stats.orphanedFiles + ' orphans, ' +
  GRAPH.stats.missingReferences + ' missing, ' +
  GRAPH.stats.circularDependencies + ' cycles';

const index = {};
GRAPH.nodes.forEach(function (n, i) {
  index[n.path] = i;
  n.x = canvas.width / 2 + Math.cos(i * 2.39996) * (60 + 4 * i);
  n.y = canvas.height / 2 + Math.sin(i * 2.39996) * (60 + 4 * i);
  n.vx = 0; n.vy = 0;
});

function step() {
  var i, j, a, b, dx, dy, d;
  for (i = 0; i < GRAPH.nodes.length; i++) {
    for (j = i + 1; j < GRAPH.nodes.length; j++) {
      a = GRAPH.nodes[i]; b = GRAPH.nodes[j];
      dx = b.x - a.x; dy = b.y - a.y;
      d = Math.max(Math.sqrt(dx * dx + dy * dy), 1);
      var rep = 1200 / (d * d);
      a.vx -= dx / d * rep; a.vy -= dy / d * rep;
      b.vx += dx / d * rep; b.vy += dy / d * rep;
    }
  }
  GRAPH.edges.forEach(function (e) {
    a = GRAPH.nodes[index[e.from]]; b = GRAPH.nodes[index[e.to]];
    if (!a || !b) return;
    dx = b.x - a.x; dy = b.y - a.y;
    d = Math.max(Math.sqrt(dx * dx + dy * dy), 1);
    var spring = (d - 90) * 0.01;
    a.vx += dx / d * spring; a.vy += dy / d * spring;
    b.vx -= dx / d * spring; b.vy -= dy / d * spring;
  });
  GRAPH.nodes.forEach(function (n) {
    n.vx *= 0.85; n.vy *= 0.85;
    n.x = Math.min(Math.max(n.x + n.vx, 20), canvas.width - 20);
    n.y = Math.min(Math.max(n.y + n.vy, 20), canvas.height - 20);
  });
}

function draw() {
  ctx.clearRect(0, 0, canvas.width, canvas.height);
  ctx.strokeStyle = '#555';
  GRAPH.edges.forEach(function (e) {
    var a = GRAPH.nodes[index[e.from]], b = GRAPH.nodes[index[e.to]];
    if (!a || !b) return;
    ctx.beginPath(); ctx.moveTo(a.x, a.y); ctx.lineTo(b.x, b.y); ctx.stroke();
    var ang = Math.atan2(b.y - a.y, b.x - a.x);
    var tx = b.x - Math.cos(ang) * 12, ty = b.y - Math.sin(ang) * 12;
    ctx.beginPath();
    ctx.moveTo(tx, ty);
    ctx.lineTo(tx - Math.cos(ang - 0.4) * 7, ty - Math.sin(ang - 0.4) * 7);
    ctx.lineTo(tx - Math.cos(ang + 0.4) * 7, ty - Math.sin(ang + 0.4) * 7);
    ctx.closePath(); ctx.fillStyle = '#777'; ctx.fill();
  });
  GRAPH.nodes.forEach(function (n) {
    ctx.beginPath();
    ctx.arc(n.x, n.y, 7, 0, Math.PI * 2);
    ctx.fillStyle = n.missing ? COLORS.unknown
      : n.isOrphan ? '#b36ff1'
      : COLORS[n.type] || COLORS.unknown;
    ctx.fill();
    if (n.isEntryPoint) {
      ctx.beginPath();
      ctx.arc(n.x, n.y, 10, 0, Math.PI * 2);
      ctx.strokeStyle = '#fff';
      ctx.stroke();
    }
    ctx.fillStyle = '#999';
    ctx.fillText(n.path, n.x + 10, n.y + 3);
  });
}

function tick() { step(); draw(); requestAnimationFrame(tick); }
tick();
</script>
</body>
</html>
"#;

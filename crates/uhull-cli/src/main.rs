use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::SubscriberBuilder;
use uhull::{convex_hull, polyhedron_convex_hull, simple_hull, HullConfig, LinForm, PivotRule, Polyhedron, UnionSet};

#[derive(Parser)]
#[command(name = "uhull-cli")]
#[command(about = "Convex hull of a union of integer-set polyhedra")]
struct Cmd {
    /// LP pivot rule: "bland" (default, always terminates) or "dantzig"
    #[arg(long, default_value = "bland")]
    pivot: String,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute the exact convex hull of a union read from a JSON file
    Hull {
        #[arg(long)]
        input: String,
    },
    /// Compute the cheaper simple-hull over-approximation (§4.10)
    SimpleHull {
        #[arg(long)]
        input: String,
    },
    /// Reduce a single polyhedron: drop redundant inequalities, promote
    /// implicit equalities
    Reduce {
        #[arg(long)]
        input: String,
    },
}

/// One member's constraint rows. Coefficients are decimal strings so
/// arbitrarily large integers survive the JSON round trip exactly; row
/// `i` is `[c0, c1, ..., c_dim]` per the library's `LinForm` convention.
#[derive(Serialize, Deserialize, Default)]
struct MemberJson {
    #[serde(default)]
    equalities: Vec<Vec<String>>,
    #[serde(default)]
    inequalities: Vec<Vec<String>>,
}

#[derive(Serialize, Deserialize)]
struct UnionJson {
    dim: usize,
    members: Vec<MemberJson>,
}

#[derive(Serialize, Deserialize)]
struct SinglePolyJson {
    dim: usize,
    #[serde(flatten)]
    member: MemberJson,
}

fn row_to_linform(row: &[String]) -> Result<LinForm> {
    let coeffs = row
        .iter()
        .map(|s| s.parse::<BigInt>().with_context(|| format!("invalid integer {s:?}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(LinForm::new(coeffs))
}

fn linform_to_row(f: &LinForm) -> Vec<String> {
    f.coeffs().iter().map(|c| c.to_string()).collect()
}

fn member_to_polyhedron(dim: usize, m: &MemberJson) -> Result<Polyhedron> {
    let mut p = Polyhedron::new(dim);
    for row in &m.equalities {
        anyhow::ensure!(row.len() == dim + 1, "equality row needs dim+1 = {} entries", dim + 1);
        p.add_equality(row_to_linform(row)?);
    }
    for row in &m.inequalities {
        anyhow::ensure!(row.len() == dim + 1, "inequality row needs dim+1 = {} entries", dim + 1);
        p.add_inequality(row_to_linform(row)?);
    }
    Ok(p)
}

fn polyhedron_to_member(p: &Polyhedron) -> MemberJson {
    MemberJson {
        equalities: p.equalities().iter().map(linform_to_row).collect(),
        inequalities: p.inequalities().iter().map(linform_to_row).collect(),
    }
}

fn parse_pivot(s: &str) -> Result<PivotRule> {
    match s.to_ascii_lowercase().as_str() {
        "bland" => Ok(PivotRule::Bland),
        "dantzig" => Ok(PivotRule::Dantzig),
        other => anyhow::bail!("unknown pivot rule {other:?} (expected \"bland\" or \"dantzig\")"),
    }
}

fn read_union(path: &str) -> Result<UnionSet> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let parsed: UnionJson = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    let members = parsed
        .members
        .iter()
        .map(|m| member_to_polyhedron(parsed.dim, m))
        .collect::<Result<Vec<_>>>()?;
    Ok(UnionSet::from_members(parsed.dim, members)?)
}

fn print_polyhedron(p: &Polyhedron) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&polyhedron_to_member(p))?);
    Ok(())
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let cfg = HullConfig::new(parse_pivot(&cmd.pivot)?);
    match cmd.action {
        Action::Hull { input } => {
            let set = read_union(&input)?;
            tracing::info!(members = set.members().len(), dim = set.dim(), "computing convex hull");
            print_polyhedron(&convex_hull(set, cfg)?)
        }
        Action::SimpleHull { input } => {
            let set = read_union(&input)?;
            tracing::info!(members = set.members().len(), dim = set.dim(), "computing simple hull");
            print_polyhedron(&simple_hull(&set, cfg)?)
        }
        Action::Reduce { input } => {
            let text = std::fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
            let parsed: SinglePolyJson = serde_json::from_str(&text).with_context(|| format!("parsing {input}"))?;
            let p = member_to_polyhedron(parsed.dim, &parsed.member)?;
            tracing::info!(dim = parsed.dim, "reducing single polyhedron");
            print_polyhedron(&polyhedron_convex_hull(p, cfg)?)
        }
    }
}

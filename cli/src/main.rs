//! netsift CLI: driving adapter for the inventory filtering engine.
//!
//! Subcommands:
//! - `show <hosts.yaml> <groups.yaml>` — list hosts and groups
//! - `host <hosts.yaml> <groups.yaml> <name>` — dump one host as JSON
//! - `group <hosts.yaml> <groups.yaml> <name>` — dump one group as JSON
//! - `filter <hosts.yaml> <groups.yaml> [clauses...]` — select hosts
//! - `members <hosts.yaml> <groups.yaml> <group>` — transitive group members
//! - `demo` — run the guided tour on the built-in reference lab

use std::process;

use colored::Colorize;
use netsift::prelude::*;
use netsift::load_inventory;
use netsift_test::sample_inventory;

const SEPARATOR_WIDTH: usize = 50;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "show" => cmd_show(&args[2..]),
        "host" => cmd_host(&args[2..]),
        "group" => cmd_group(&args[2..]),
        "filter" => cmd_filter(&args[2..]),
        "members" => cmd_members(&args[2..]),
        "demo" => cmd_demo(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_show(args: &[String]) -> Result<(), String> {
    let inv = load(args)?;

    separator();
    println!("HOSTS IN INVENTORY");
    for name in inv.host_names() {
        println!("Host: {}", name.cyan());
    }
    println!("There are {} hosts in this inventory.", inv.hosts().len());
    separator();
    println!("GROUPS IN INVENTORY");
    for name in inv.group_names() {
        println!("Group: {}", name.cyan());
    }
    println!("There are {} groups in this inventory.", inv.groups().len());
    separator();

    Ok(())
}

fn cmd_host(args: &[String]) -> Result<(), String> {
    let inv = load(args)?;
    let name = args
        .get(2)
        .ok_or_else(|| "host requires a host name".to_string())?;
    let host = inv
        .host(name)
        .ok_or_else(|| format!("no host named \"{name}\""))?;

    let dump = serde_json::to_string_pretty(host).map_err(|e| e.to_string())?;
    separator();
    println!("Displaying information for host: {}", name.cyan());
    println!("{dump}");
    separator();

    Ok(())
}

fn cmd_group(args: &[String]) -> Result<(), String> {
    let inv = load(args)?;
    let name = args
        .get(2)
        .ok_or_else(|| "group requires a group name".to_string())?;
    let group = inv
        .group(name)
        .ok_or_else(|| format!("no group named \"{name}\""))?;

    let dump = serde_json::to_string_pretty(group).map_err(|e| e.to_string())?;
    separator();
    println!("Displaying information for group: {}", name.cyan());
    println!("{dump}");
    separator();

    Ok(())
}

fn cmd_filter(args: &[String]) -> Result<(), String> {
    let inv = load(args)?;
    let filter = parse_filter_args(&args[2..])?;
    let selected = inv.filter(&filter).map_err(|e| e.to_string())?;

    separator();
    println!("Hosts matching the filter:");
    for name in selected.host_names() {
        println!("Host: {}", name.cyan());
    }
    println!("Total: {}", selected.hosts().len());
    separator();

    Ok(())
}

fn cmd_members(args: &[String]) -> Result<(), String> {
    let inv = load(args)?;
    let name = args
        .get(2)
        .ok_or_else(|| "members requires a group name".to_string())?;
    let members = inv.children_of_group(name).map_err(|e| e.to_string())?;

    separator();
    println!("Hosts which are children of group {}:", name.cyan());
    for host in &members {
        println!("Host: {}", host.cyan());
    }
    println!("Total: {}", members.len());
    separator();

    Ok(())
}

/// The guided tour: the basic → intermediate → advanced progression over
/// the built-in reference lab.
fn cmd_demo() -> Result<(), String> {
    let inv = sample_inventory();

    banner("BASIC: whole inventory");
    println!(
        "{} hosts, {} groups",
        inv.hosts().len(),
        inv.groups().len()
    );

    banner("BASIC: hosts with vendor cisco");
    show_hosts(&run(&inv, attr("vendor").eq("cisco"))?);

    banner("INTERMEDIATE: cisco AND router");
    show_hosts(&run(
        &inv,
        attr("vendor").eq("cisco") & attr("device_type").eq("router"),
    )?);

    banner("INTERMEDIATE: chained refinement (cisco, then switch)");
    let cisco = run(&inv, attr("vendor").eq("cisco"))?;
    show_hosts(&cisco.filter(&attr("device_type").eq("switch")).map_err(|e| e.to_string())?);

    banner("ADVANCED: site_code mel");
    show_hosts(&run(&inv, attr("site_code").eq("mel"))?);

    banner("ADVANCED: NOT site_code mel");
    show_hosts(&run(&inv, !attr("site_code").eq("mel"))?);

    banner("ADVANCED: site_code mel OR chc");
    show_hosts(&run(
        &inv,
        attr("site_code").eq("mel") | attr("site_code").eq("chc"),
    )?);

    banner("ADVANCED: NOT switch AND NOT router");
    show_hosts(&run(
        &inv,
        !attr("device_type").eq("switch") & !attr("device_type").eq("router"),
    )?);

    banner("ADVANCED: sla >= 80");
    show_hosts(&run(&inv, attr("sla").ge(80))?);

    banner("ADVANCED: southern-hemisphere devices (transitive groups)");
    show_hosts(&run(&inv, attr("groups").contains("southern"))?);

    banner("ADVANCED: members of group test");
    let members = inv.children_of_group("test").map_err(|e| e.to_string())?;
    for host in &members {
        println!("Host: {}", host.cyan());
    }
    println!("Total: {}", members.len());
    separator();

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Inventory loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load(args: &[String]) -> Result<Inventory, String> {
    let (hosts_path, groups_path) = match args {
        [hosts, groups, ..] => (hosts, groups),
        _ => return Err("expected <hosts.yaml> <groups.yaml>".to_string()),
    };
    load_inventory(hosts_path, groups_path).map_err(|e| e.to_string())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Filter clause parsing
// ═══════════════════════════════════════════════════════════════════════════════

/// Parse filter clauses into one conjunction:
///
/// - `--where attr=value` — attribute equals value
/// - `--not attr=value` — attribute does not equal value (negated clause)
/// - `--any attr=v1,v2,...` — attribute is one of the values
/// - `--member group` — host is a direct or transitive member
fn parse_filter_args(args: &[String]) -> Result<Filter<Host>, String> {
    let mut clauses: Vec<Filter<Host>> = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--where" => {
                let (key, value) = key_value(args, &mut i, "--where")?;
                clauses.push(attr(key).eq(parse_value(&value)));
            }
            "--not" => {
                let (key, value) = key_value(args, &mut i, "--not")?;
                clauses.push(!attr(key).eq(parse_value(&value)));
            }
            "--any" => {
                let (key, value) = key_value(args, &mut i, "--any")?;
                let choices: Vec<AttrValue> =
                    value.split(',').map(|v| parse_value(v.trim())).collect();
                clauses.push(attr(key).one_of(choices));
            }
            "--member" => {
                let group = args
                    .get(i + 1)
                    .ok_or_else(|| "--member requires a group name".to_string())?;
                clauses.push(attr(netsift::GROUPS_ATTR).contains(group.as_str()));
                i += 2;
            }
            other => return Err(format!("unexpected argument \"{other}\"")),
        }
    }

    Ok(Filter::from_all(clauses, Filter::match_all()))
}

fn key_value(args: &[String], i: &mut usize, flag: &str) -> Result<(String, String), String> {
    let pair = args
        .get(*i + 1)
        .ok_or_else(|| format!("{flag} requires attr=value"))?;
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("invalid pair \"{pair}\", expected attr=value"))?;
    *i += 2;
    Ok((key.to_owned(), value.to_owned()))
}

/// Interpret a command-line value as a typed attribute value: integer,
/// float, or boolean when it parses as one, string otherwise.
fn parse_value(raw: &str) -> AttrValue {
    if let Ok(i) = raw.parse::<i64>() {
        return AttrValue::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return AttrValue::Float(f);
    }
    match raw {
        "true" => AttrValue::Bool(true),
        "false" => AttrValue::Bool(false),
        _ => AttrValue::String(raw.to_string()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Output helpers
// ═══════════════════════════════════════════════════════════════════════════════

fn run(inv: &Inventory, filter: Filter<Host>) -> Result<Inventory, String> {
    inv.filter(&filter).map_err(|e| e.to_string())
}

fn show_hosts(inv: &Inventory) {
    for name in inv.host_names() {
        println!("Host: {}", name.cyan());
    }
    println!("Total: {}", inv.hosts().len());
    separator();
}

fn banner(title: &str) {
    separator();
    println!("{title}");
}

fn separator() {
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
}

fn print_usage() {
    eprintln!(
        "Usage: netsift <command> [options]

Commands:
  show <hosts.yaml> <groups.yaml>             List hosts and groups
  host <hosts.yaml> <groups.yaml> <name>      Dump one host as JSON
  group <hosts.yaml> <groups.yaml> <name>     Dump one group as JSON
  filter <hosts.yaml> <groups.yaml> [clauses] Select hosts by filter clauses
  members <hosts.yaml> <groups.yaml> <group>  List transitive group members
  demo                                        Run the guided tour
  help                                        Show this help

Filter clauses (combined with AND):
  --where attr=value    attribute equals value
  --not attr=value      attribute does not equal value
  --any attr=v1,v2      attribute is one of the values
  --member group        host is in the group (transitively)"
    );
}

use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;
use tabled::Tabled;
use tabled::settings::Style;
use timetable::rank::rank;
use timetable::scenario;
use timetable::search::monitor::{SolutionLimitMonitor, TimeLimitMonitor};
use timetable::search::stats::SearchStatistics;
use timetable::{Assignment, Course, Day, Enumeration, FirstFit, FirstOutcome, Solver, Termination};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Stop enumerating after this many timetables
    #[arg(short, long)]
    limit: Option<u64>,

    /// Abort a search after this many milliseconds
    #[arg(short, long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Look for a single timetable on startup instead of all of them
    #[arg(long)]
    first: bool,

    /// Log search progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

#[derive(Tabled)]
struct OfferingRow {
    course: String,
    credits: u32,
    option: usize,
    teacher: String,
    times: String,
    priority: u32,
}

#[derive(Tabled)]
struct SolutionRow {
    rank: usize,
    score: u64,
    credits: u32,
    classes: String,
}

#[derive(Tabled)]
struct DayRow {
    day: String,
    classes: String,
}

fn print_table<T: Tabled>(rows: &[T]) {
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if rows.len() > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn paginate(content: String) {
    let spawned = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match spawned {
        Ok(pager) => pager,
        Err(_) => {
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn offering_rows(courses: &[Course]) -> Vec<OfferingRow> {
    courses
        .iter()
        .flat_map(|c| {
            c.offerings.iter().enumerate().map(move |(i, o)| OfferingRow {
                course: c.name.to_string(),
                credits: c.credits,
                option: i + 1,
                teacher: o.teacher().to_string(),
                times: o
                    .slots()
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                priority: o.priority(),
            })
        })
        .collect()
}

fn solution_row(rank: usize, solution: &Assignment<'_>) -> SolutionRow {
    SolutionRow {
        rank,
        score: solution.score(),
        credits: solution.total_credits(),
        classes: solution
            .picks()
            .iter()
            .map(|p| format!("{}: {}", p.course.name, p.offering.teacher()))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn day_rows(solution: &Assignment<'_>) -> Vec<DayRow> {
    Day::ALL
        .into_iter()
        .filter_map(|day| {
            let mut classes = solution
                .picks()
                .iter()
                .flat_map(|p| {
                    p.offering
                        .slots()
                        .iter()
                        .filter(move |s| s.day == day)
                        .map(move |s| (s.start, s.end, p))
                })
                .collect::<Vec<_>>();
            if classes.is_empty() {
                return None;
            }
            classes.sort_by_key(|(start, _, _)| *start);
            Some(DayRow {
                day: day.to_string(),
                classes: classes
                    .iter()
                    .map(|(start, end, p)| {
                        format!("{}-{} {} ({})", start, end, p.course.name, p.offering.teacher())
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
        })
        .collect()
}

fn print_statistics_line(stats: &SearchStatistics) {
    println!(
        "{}",
        format!(
            "{} nodes, {} conflicts, {:.3}s",
            stats.nodes,
            stats.conflicts,
            stats.duration.as_secs_f64()
        )
        .dimmed()
    );
}

struct Shell {
    courses: Vec<Course>,
    limit: Option<u64>,
    timeout: Option<Duration>,
    /// Offering indices of the last ranked enumeration, best first.
    last_solutions: Vec<Vec<usize>>,
    last_statistics: Option<SearchStatistics>,
}

impl Shell {
    fn solver(&self) -> Solver<'_> {
        let mut solver = Solver::new(&self.courses);
        if let Some(limit) = self.limit {
            solver.add_monitor(SolutionLimitMonitor::new(limit));
        }
        if let Some(timeout) = self.timeout {
            solver.add_monitor(TimeLimitMonitor::new(timeout));
        }
        solver
    }

    fn solve(&mut self) {
        let Enumeration {
            mut solutions,
            termination,
            statistics,
        } = match self.solver().solve_all() {
            Ok(result) => result,
            Err(e) => {
                println!("{}", format!("Error: {}", e).red());
                return;
            }
        };

        rank(&mut solutions);
        let rows = solutions
            .iter()
            .enumerate()
            .map(|(i, s)| solution_row(i + 1, s))
            .collect::<Vec<_>>();
        let choices = solutions.iter().map(|s| s.choices()).collect::<Vec<_>>();

        if let Termination::Aborted(reason) = &termination {
            println!("{}", format!("Search stopped early: {}", reason).yellow());
        }
        if rows.is_empty() {
            println!("{}", "No conflict-free timetable found.".red());
        } else {
            println!("{}", format!("Found {} timetables.", rows.len()).green());
            print_table(&rows);
        }
        print_statistics_line(&statistics);

        self.last_solutions = choices;
        self.last_statistics = Some(statistics);
    }

    fn first(&mut self) {
        let FirstFit { outcome, statistics } = match self.solver().solve_first() {
            Ok(first) => first,
            Err(e) => {
                println!("{}", format!("Error: {}", e).red());
                return;
            }
        };

        match &outcome {
            FirstOutcome::Found(solution) => {
                println!(
                    "{}",
                    format!("Found a timetable worth {} ({} credits).", solution.score(), solution.total_credits())
                        .green()
                );
                print_table(&day_rows(solution));
            }
            FirstOutcome::Unsatisfiable => println!("{}", "No conflict-free timetable exists.".red()),
            FirstOutcome::Aborted(reason) => {
                println!("{}", format!("Search stopped early: {}", reason).yellow())
            }
        }
        print_statistics_line(&statistics);
        self.last_statistics = Some(statistics);
    }

    fn show(&self, rank: usize) {
        let solution = rank
            .checked_sub(1)
            .and_then(|i| self.last_solutions.get(i))
            .and_then(|choices| Assignment::from_choices(&self.courses, choices));
        match solution {
            Some(solution) => {
                println!("{}", solution_row(rank, &solution).classes.bold());
                print_table(&day_rows(&solution));
            }
            None => println!("No timetable #{}. Run 'solve' first.", rank),
        }
    }

    fn prefer(&mut self, teacher: &str, priority: u32) {
        let matched = self
            .courses
            .iter()
            .flat_map(|c| c.offerings.iter())
            .filter(|o| &**o.teacher() == teacher)
            .count();
        if matched == 0 {
            println!("No offerings taught by {}.", teacher);
            return;
        }
        self.courses = scenario::apply_preference(&self.courses, teacher, priority);
        self.last_solutions.clear();
        println!("Updated {} offerings. Run 'solve' to rank again.", matched);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("timetable=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let courses = scenario::load_from_file(&args.scenario)?;
    println!(
        "Loaded {} courses from {}",
        courses.len(),
        args.scenario.display()
    );

    let mut shell = Shell {
        courses,
        limit: args.limit,
        timeout: args.timeout_ms.map(Duration::from_millis),
        last_solutions: Vec::new(),
        last_statistics: None,
    };
    if args.first {
        shell.first();
    } else {
        shell.solve();
    }

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "ls".to_string(),
            "solve".to_string(),
            "first".to_string(),
            "show".to_string(),
            "prefer".to_string(),
            "stats".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => print_table(&offering_rows(&shell.courses)),
                    "solve" => shell.solve(),
                    "first" => shell.first(),
                    "show" => {
                        match parts.get(1).and_then(|n| n.parse::<usize>().ok()) {
                            Some(n) => shell.show(n),
                            None => println!("Usage: show <rank>"),
                        }
                    },
                    "prefer" => {
                        if let (Some(teacher), Some(priority)) = (parts.get(1), parts.get(2).and_then(|p| p.parse::<u32>().ok())) {
                            shell.prefer(teacher, priority);
                        } else {
                            println!("Usage: prefer <teacher> <priority>");
                        }
                    },
                    "stats" => match &shell.last_statistics {
                        Some(stats) => println!("{}", stats),
                        None => println!("No search has run yet."),
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls                   - List courses and their offerings");
                        println!("  solve                - Enumerate all conflict-free timetables, best first");
                        println!("  first                - Find a single conflict-free timetable");
                        println!("  show <n>             - Show timetable #<n> of the last 'solve' by day");
                        println!("  prefer <teacher> <p> - Give every offering of <teacher> priority <p>");
                        println!("  stats                - Show statistics of the last search");
                        println!("  help / ?             - Show this help menu");
                        println!("  exit / quit          - Exit\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

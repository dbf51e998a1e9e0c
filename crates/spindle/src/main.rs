use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use spindle::protocol::{self, Reply, Request, SOCKET_PATH, Snapshot};
use spindle::{ListConfig, OptionList, Segment, SpinConfig, generate_spin, resolve_winner};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "spindle", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Add an option to the wheel
    Add { text: String },
    /// Remove an option by its label
    Remove { label: String },
    /// Rename an option
    Edit { label: String, text: String },
    /// Clear the wheel (to empty or to the defaults, per the daemon's config)
    Clear,
    /// Restore the default options and rotation
    Reset,
    /// Spin the wheel and print the winner once it stops
    Spin {
        /// Return as soon as the spin starts instead of waiting for the winner
        #[arg(long)]
        no_wait: bool,
    },
    /// Print the wheel
    Show,
    /// Spin a throwaway wheel locally, without the daemon
    Simulate {
        #[arg(required = true, num_args = 2..)]
        labels: Vec<String>,

        #[arg(short = 'n', long, default_value_t = 1)]
        spins: usize,

        /// Seed for reproducible results
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let request = match cli.command {
        Commands::Add { text } => Request::Add { text },
        Commands::Remove { label } => Request::Remove { label },
        Commands::Edit { label, text } => Request::Edit { label, text },
        Commands::Clear => Request::Clear,
        Commands::Reset => Request::Reset,
        Commands::Spin { no_wait } => Request::Spin { wait: !no_wait },
        Commands::Show => Request::Show,
        Commands::Simulate {
            labels,
            spins,
            seed,
        } => return simulate(&labels, spins, seed),
    };

    let reply = send_request(&request)?;
    print_reply(&reply)
}

fn send_request(request: &Request) -> anyhow::Result<Reply> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to rota daemon at {}: {}. Is rota running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", protocol::encode(request)?)?;
    log::debug!("Sent {:?}", request);

    let mut line = String::new();
    BufReader::new(&stream).read_line(&mut line)?;
    if line.is_empty() {
        anyhow::bail!("rota closed the connection without replying");
    }
    Ok(protocol::decode(&line)?)
}

fn print_reply(reply: &Reply) -> anyhow::Result<()> {
    match reply {
        Reply::Ok { snapshot } => print_wheel(snapshot),
        Reply::Spinning {
            target,
            duration_ms,
            snapshot,
        } => {
            print_wheel(snapshot);
            println!("Spinning to {target:.1}° over {duration_ms} ms");
        }
        Reply::Winner { label, rotation } => {
            println!("{label}");
            log::debug!("Wheel stopped at {rotation:.3}°");
        }
        Reply::Rejected { code, message } => anyhow::bail!("{message} ({code})"),
    }
    Ok(())
}

fn format_segment(segment: &Segment, pointed: bool) -> String {
    let mut line = format!(
        "{:>3}  [{:>6.1}°, {:>6.1}°)  {}",
        segment.index, segment.start, segment.end, segment.label
    );
    if pointed {
        line.push_str(" ◀");
    }
    line
}

fn print_wheel(snapshot: &Snapshot) {
    if snapshot.segments.is_empty() {
        println!("(the wheel is empty)");
    }

    for segment in &snapshot.segments {
        let pointed = snapshot.pointed.as_ref() == Some(&segment.label);
        println!("{}", format_segment(segment, pointed));
    }

    println!(
        "rotation {:.1}°, pointer at {:.1}°{}",
        snapshot.rotation,
        snapshot.pointer_angle,
        if snapshot.spinning { ", spinning" } else { "" }
    );
    if !snapshot.can_spin {
        println!("Not enough options to spin");
    }
    if let Some(winner) = &snapshot.last_winner {
        println!("Last winner: {winner}");
    }
}

fn simulate(labels: &[String], spins: usize, seed: Option<u64>) -> anyhow::Result<()> {
    let limits = ListConfig::default();
    let config = SpinConfig::default();
    let options = OptionList::from_labels(labels, &limits)?;
    let mut rng = seed.map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);

    let mut rotation = 0.0;
    for round in 1..=spins {
        let spin = generate_spin(&options, rotation, &config, limits.min_options, &mut rng)?;
        rotation = spin.rotation;
        let winner = resolve_winner(&options, rotation, &config)?;
        println!("{round:>3}. {winner} ({rotation:.1}°, {} turns)", spin.turns);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle::Label;

    #[test]
    fn test_format_segment() {
        let segment = Segment {
            index: 1,
            label: Label::new("Bob"),
            start: 90.0,
            end: 180.0,
        };
        let cases = vec![
            (false, "  1  [  90.0°,  180.0°)  Bob"),
            (true, "  1  [  90.0°,  180.0°)  Bob ◀"),
        ];

        for (pointed, expected) in cases {
            assert_eq!(format_segment(&segment, pointed), expected);
        }
    }
}

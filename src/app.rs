use std::io::{BufWriter, Write, stdout};

use crate::{
    common::error::AppError,
    io::{reader, writer},
    worker::processor::Processor,
};

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 2 {
        return Err(AppError::MissingArg);
    }
    let input_path = &args[1];

    let file = std::fs::File::open(input_path)?;
    let stdout = stdout();
    replay(file, BufWriter::new(stdout.lock()))
}

/// Replays the CSV event stream from `input` and writes the snapshot and
/// audit log to `output`. An empty stream writes nothing.
pub fn replay<R: std::io::Read, W: Write>(input: R, mut output: W) -> Result<(), AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    // One row at a time: the first bad row in file order ends the replay,
    // whether it fails to parse or fails to apply.
    let mut processor = Processor::new();
    let mut applied = 0usize;
    for event in reader::read_events(&mut csv_reader) {
        let event = event?;
        processor = processor.process(&event).inspect_err(|err| {
            tracing::warn!(
                row = applied + 1,
                event_type = event.event_type(),
                error = %err,
                "replay aborted"
            );
        })?;
        applied += 1;
    }

    let Some(account) = processor.into_aggregate() else {
        tracing::info!("event stream is empty, nothing to replay");
        return Ok(());
    };
    tracing::info!(
        account_id = account.account_id(),
        events = applied,
        status = account.status().as_str(),
        "account replayed"
    );

    writer::write_account(&mut output, &account)?;
    if !account.log().is_empty() {
        writeln!(output)?;
        writer::write_log(&mut output, account.log())?;
    }
    output.flush()?;

    Ok(())
}

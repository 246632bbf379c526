//! Live threaded session: a producer thread feeds frames over a bounded
//! channel at real tick cadence while the pipeline worker owns the window
//! buffer and stabilizer.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use crossbeam_channel::bounded;
use signpipe::config::AppConfig;
use signpipe::feedback::StableAnnouncer;
use signpipe::labels::LabelCatalog;
use signpipe::log_debug;
use signpipe::pipeline::{start_pipeline_job, FrameFeed, FrameSample, PipelineMessage, TickMeter};
use signpipe::rate_limit::Throttle;
use signpipe::report::{self, ReportEvent};

use crate::demo;
use crate::output::{print_result, print_summary};

pub(crate) fn run_live_session(config: &AppConfig, catalog: &LabelCatalog) -> Result<()> {
    let cfg = config.pipeline_config();
    let (frame_tx, frame_rx) = bounded::<FrameSample>(cfg.channel_capacity);
    let dropped = Arc::new(AtomicUsize::new(0));
    let feed = FrameFeed::new(frame_tx, Arc::clone(&dropped));
    let meter = TickMeter::new();

    let script_len = demo::demo_script(catalog).len();
    let samples = demo::demo_samples(cfg.window_frames, script_len);
    let producer = spawn_producer(feed, samples, cfg.tick_interval_ms);

    let classifier = demo::demo_classifier(catalog);
    let mut job = start_pipeline_job(
        cfg,
        Box::new(classifier),
        frame_rx,
        Arc::clone(&dropped),
        Some(meter.clone()),
    );

    let mut announcer = config.announce.then(|| announcer_for(config));

    let metrics = loop {
        match job.receiver.recv() {
            Ok(PipelineMessage::Result(result)) => {
                if let Some(announcer) = announcer.as_mut() {
                    announcer.observe(&result);
                }
                print_result(config, &result);
            }
            Ok(PipelineMessage::Finished(metrics)) => break metrics,
            Err(_) => bail!("pipeline worker disconnected before finishing"),
        }
    };

    // Announcer goes first so pending debounce timers are cancelled before
    // the worker joins.
    drop(announcer);
    if let Some(handle) = job.handle.take() {
        let _ = handle.join();
    }
    let _ = producer.join();

    let rate = meter.rate();
    print_summary(config, &metrics, (rate > 0.0).then_some(rate));
    Ok(())
}

fn announcer_for(config: &AppConfig) -> StableAnnouncer {
    let json = config.json;
    StableAnnouncer::new(
        move |label| {
            if json {
                report::emit(&ReportEvent::Announcement { label });
            } else {
                println!(">>> {label}");
            }
        },
        Duration::from_millis(config.announce_debounce_ms),
        config.confidence_threshold,
    )
}

/// Emit the scripted samples at the configured cadence. Attempts run faster
/// than the tick interval; the throttle gates actual delivery so the feed
/// sees one frame per tick.
fn spawn_producer(
    feed: FrameFeed,
    samples: Vec<FrameSample>,
    tick_interval_ms: u64,
) -> thread::JoinHandle<()> {
    let interval = Duration::from_millis(tick_interval_ms);
    thread::spawn(move || {
        let mut throttle = Throttle::new(|sample: FrameSample| feed.offer(sample), interval);
        let mut queue = samples.into_iter();
        let mut next = queue.next();
        while let Some(sample) = next.take() {
            match throttle.call(sample.clone()) {
                Some(true) => next = queue.next(),
                // Consumer went away; nothing left to feed.
                Some(false) => break,
                None => next = Some(sample),
            }
            thread::sleep(interval / 4);
        }
        if feed.dropped() > 0 {
            log_debug(&format!("producer dropped {} frames", feed.dropped()));
        }
    })
}

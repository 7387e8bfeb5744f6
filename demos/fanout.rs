//! Fan-out emitter: one sink collection, four storage strategies.
//!
//! Mirrors the classic multi-stream logger: the emitter holds a vector of
//! `UniformHandle<dyn Sink>` and neither knows nor cares whether each sink is
//! borrowed from the caller, owned by the emitter, shared with the caller
//! through an `Arc`, or promoted from a `Box` holding a non-cloneable sink.
//!
//! Run with `cargo run --example fanout`.

use std::sync::{Arc, Mutex};

use uniform_handle::UniformHandle;

/// A line-oriented output sink. Takes `&self` so shared sinks can be written
/// through any alias; implementors use interior mutability where they buffer.
trait Sink {
    fn emit(&self, line: &str);
    fn name(&self) -> &str;
}

/// Writes straight to stdout.
struct ConsoleSink {
    prefix: &'static str,
}

impl Sink for ConsoleSink {
    fn emit(&self, line: &str) {
        println!("{} {line}", self.prefix);
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Buffers lines for later inspection by whoever shares the `Arc`.
struct BufferSink {
    label: String,
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            lines: Mutex::new(Vec::new()),
        }
    }
}

impl Sink for BufferSink {
    fn emit(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_owned());
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Deliberately not `Clone` and constructed through a `Box`: the handle stays
/// cloneable anyway because exclusive sources are promoted to shared storage.
struct CountingSink {
    emitted: Mutex<usize>,
}

impl Sink for CountingSink {
    fn emit(&self, _line: &str) {
        *self.emitted.lock().unwrap() += 1;
    }

    fn name(&self) -> &str {
        "counter"
    }
}

/// The external consumer: iterates one collection through one interface.
#[derive(Default)]
struct Fanout {
    sinks: Vec<UniformHandle<dyn Sink>>,
}

impl Fanout {
    fn add(&mut self, sink: UniformHandle<dyn Sink>) -> &mut Self {
        if sink.is_empty() {
            eprintln!("fanout: skipping empty sink handle");
        } else {
            self.sinks.push(sink);
        }
        self
    }

    fn emit(&self, line: &str) {
        for sink in &self.sinks {
            if let Some(sink) = sink.as_ref() {
                sink.emit(line);
            }
        }
    }

    fn roster(&self) -> Vec<&str> {
        self.sinks
            .iter()
            .filter_map(UniformHandle::as_ref)
            .map(Sink::name)
            .collect()
    }
}

fn main() {
    let mut console = ConsoleSink { prefix: "[fanout]" };
    let audit = Arc::new(BufferSink::new("audit"));
    let counter: UniformHandle<dyn Sink> = UniformHandle::boxed(Box::new(CountingSink {
        emitted: Mutex::new(0),
    }));

    let mut fanout = Fanout::default();
    fanout
        // SAFETY: `console` lives on this stack frame until after the last
        // `emit` call below.
        .add(unsafe { UniformHandle::borrowed(&mut console as *mut ConsoleSink as *mut dyn Sink) })
        // Owned by value, then upcast into the trait-object handle.
        .add(UniformHandle::owned(BufferSink::new("local")).map(|s| s as &dyn Sink))
        // Shared with this function, which keeps inspecting it afterwards.
        .add(UniformHandle::shared(Arc::<BufferSink>::clone(&audit)))
        // Promoted from an exclusive box; the clone proves the handle stayed
        // cloneable over a non-cloneable sink.
        .add(counter.clone());

    println!("sinks: {:?}", fanout.roster());

    fanout.emit("hello world");
    fanout.emit("storage strategy is nobody's business");

    println!(
        "audit captured {} lines",
        audit.lines.lock().unwrap().len()
    );
    // The retained clone still resolves; which strategy backs it stays opaque.
    println!("counter still resolves: {}", !counter.is_empty());
}

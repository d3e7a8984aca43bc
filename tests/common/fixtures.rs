//! Simulation fixtures shaped like the responses of the reference backend.

use pipeviz::simulation::{
    Actor, DataAfter, LogEntry, SimulationResult, SimulationSummary, Step,
};

fn plain(text: &str) -> DataAfter {
    DataAfter {
        message_plain: Some(text.to_string()),
        ..DataAfter::default()
    }
}

/// "Hello" sent with Caesar key 3 after a successful auth check.
pub fn encrypted_exchange() -> SimulationResult {
    let steps = vec![
        Step::new("Create Anonymous Pipe", Actor::System)
            .with_description("System creates an anonymous pipe with read_fd=3 and write_fd=4.")
            .with_data(DataAfter::default()),
        Step::new("Fork Process", Actor::System)
            .with_description("Parent process forks to create a child process."),
        Step::new("Authentication Check", Actor::System)
            .with_description("Parent and child initialize IPC connection with auth token."),
        Step::new("Parent Prepares Message", Actor::Parent)
            .with_description("Parent process prepares the message to send through the pipe.")
            .with_data(plain("Hello")),
        Step::new("Encrypt Message", Actor::Parent)
            .with_description("Parent encrypts the message using a simple Caesar cipher with key=3.")
            .with_data(DataAfter {
                encrypted: Some("Khoor".into()),
                ..DataAfter::default()
            }),
        Step::new("Write to Pipe", Actor::Parent)
            .with_description("Parent writes data to pipe using write_fd=4.")
            .with_data(DataAfter::default())
            .with_pipe_data("Khoor"),
        Step::new("Read from Pipe", Actor::Child)
            .with_description("Child reads data from pipe using read_fd=3.")
            .with_data(DataAfter::default())
            .with_pipe_data("Khoor"),
        Step::new("Decrypt Message", Actor::Child)
            .with_description("Child decrypts the received data using the same key=3.")
            .with_data(DataAfter {
                decrypted: Some("Hello".into()),
                ..DataAfter::default()
            }),
        Step::new("Child Prints Output", Actor::Child)
            .with_description("Child prints: \"Child received: Hello\" to stdout.")
            .with_data(DataAfter::default()),
    ];

    let logs = vec![
        LogEntry::new("1700000000", "INFO", "Anonymous pipe created: read_fd=3, write_fd=4"),
        LogEntry::new("1700000000", "INFO", "fork() called: parent and child processes now exist"),
        LogEntry::new("1700000000", "INFO", "Authentication successful: IPC connection established"),
        LogEntry::new("1700000000", "INFO", "Message encrypted using Caesar cipher key=3"),
        LogEntry::new("1700000000", "INFO", "Parent wrote 5 bytes to pipe"),
        LogEntry::new("1700000000", "INFO", "Child read 5 bytes from pipe"),
        LogEntry::new("1700000000", "INFO", "Child decrypted the message successfully"),
        LogEntry::new("1700000000", "INFO", "Child printed: \"Child received: Hello\""),
    ];

    SimulationResult::new(steps, logs).with_summary(SimulationSummary {
        success: true,
        reason: None,
        final_message: Some("Hello".into()),
        used_encryption: Some(true),
        key: Some(3),
    })
}

/// Auth check fails; no message is sent.
pub fn rejected_exchange() -> SimulationResult {
    let steps = vec![
        Step::new("Create Anonymous Pipe", Actor::System),
        Step::new("Fork Process", Actor::System),
        Step::new("Authentication Check", Actor::System),
        Step::new("Authentication Failed", Actor::System)
            .with_description("Auth token does not match. IPC connection is rejected."),
    ];
    let logs = vec![LogEntry::new("1700000000", "ERROR", "Authentication failed: invalid token")];

    SimulationResult::new(steps, logs).with_summary(SimulationSummary {
        success: false,
        reason: Some("Authentication failed.".into()),
        final_message: None,
        used_encryption: None,
        key: None,
    })
}

/// Scenario with one parent write and a single log line.
pub fn single_write() -> SimulationResult {
    SimulationResult::new(
        vec![Step::new("Write", Actor::Parent)
            .with_data(plain("hi"))
            .with_pipe_data("hi")],
        vec![LogEntry::new("t0", "INFO", "done")],
    )
}

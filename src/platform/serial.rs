//! Serial device link
//!
//! A reader thread turns newline-framed device output into `DeviceEvent`s and
//! pushes them onto a channel. The frame loop is the only consumer and drains
//! the channel once per frame, so each payload lands as one whole message.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, StopBits};

/// How long a port read waits before the reader loops again
pub const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Events emitted by the device link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Opened,
    Closed,
    /// One line of device output, line terminator stripped
    Data(String),
    Error(String),
}

/// Connection lifecycle as seen by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Closed,
    /// Reader thread started, no `Opened` yet
    Connecting,
    Open,
}

/// Single-consumer queue of device events plus the link lifecycle
pub struct DeviceLink {
    tx: Sender<DeviceEvent>,
    rx: Receiver<DeviceEvent>,
    state: LinkState,
}

impl Default for DeviceLink {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLink {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            state: LinkState::Closed,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// True once a connection is open or being opened
    pub fn is_open(&self) -> bool {
        self.state != LinkState::Closed
    }

    /// Producer handle for other event sources
    pub fn sender(&self) -> Sender<DeviceEvent> {
        self.tx.clone()
    }

    /// Open a serial port at `baud_rate` (8N1, no flow control) and stream its lines
    pub fn connect_path(&mut self, path: &Path, baud_rate: u32) -> Option<JoinHandle<()>> {
        self.connect_with(path, baud_rate, open_serial)
    }

    /// Like `connect_path`, with the port opened by `open` on the reader thread
    pub fn connect_with<F, R>(&mut self, path: &Path, baud_rate: u32, open: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(&Path, u32) -> io::Result<R> + Send + 'static,
        R: Read + Send + 'static,
    {
        log::info!("Opening serial device {} ({} baud)", path.display(), baud_rate);
        let path: PathBuf = path.to_path_buf();
        self.spawn(move |tx| match open(&path, baud_rate) {
            Ok(port) => {
                if tx.send(DeviceEvent::Opened).is_ok() {
                    pump(BufReader::new(port), &tx);
                }
            }
            Err(e) => {
                let _ = tx.send(DeviceEvent::Error(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                )));
            }
        })
    }

    /// Stream lines from an already-open reader
    pub fn attach<R>(&mut self, reader: R) -> Option<JoinHandle<()>>
    where
        R: BufRead + Send + 'static,
    {
        self.spawn(move |tx| {
            if tx.send(DeviceEvent::Opened).is_ok() {
                pump(reader, &tx);
            }
        })
    }

    /// Take every event queued since the last drain, in arrival order
    pub fn drain(&mut self) -> Vec<DeviceEvent> {
        let events: Vec<DeviceEvent> = self.rx.try_iter().collect();
        for event in &events {
            match event {
                DeviceEvent::Opened => self.state = LinkState::Open,
                DeviceEvent::Closed | DeviceEvent::Error(_) => self.state = LinkState::Closed,
                DeviceEvent::Data(_) => {}
            }
        }
        events
    }

    fn spawn<F>(&mut self, body: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Sender<DeviceEvent>) + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("device-link".into())
            .spawn(move || body(tx));
        match spawned {
            Ok(handle) => {
                self.state = LinkState::Connecting;
                Some(handle)
            }
            Err(e) => {
                log::error!("Failed to start device reader: {}", e);
                let _ = self.tx.send(DeviceEvent::Error(e.to_string()));
                None
            }
        }
    }
}

/// Open a serial port in raw 8N1 mode at `baud_rate`
pub fn open_serial(path: &Path, baud_rate: u32) -> io::Result<Box<dyn serialport::SerialPort>> {
    let port = serialport::new(path.to_string_lossy(), baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(READ_TIMEOUT)
        .open()?;
    Ok(port)
}

/// Forward lines until EOF, a read error, or the consumer going away
///
/// Read timeouts just mean the device is quiet; a partial line survives them.
fn pump<R: BufRead>(mut reader: R, tx: &Sender<DeviceEvent>) {
    let mut buf = Vec::with_capacity(32);
    loop {
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) if buf.is_empty() => {
                let _ = tx.send(DeviceEvent::Closed);
                return;
            }
            Ok(_) => {
                // Devices emit junk bytes on reset; decode lossily
                let line = String::from_utf8_lossy(&buf).trim().to_string();
                buf.clear();
                if line.is_empty() {
                    continue;
                }
                if tx.send(DeviceEvent::Data(line)).is_err() {
                    return;
                }
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {}
            Err(e) => {
                let _ = tx.send(DeviceEvent::Error(e.to_string()));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Reader that replays a fixed script of chunks and errors
    struct Scripted(VecDeque<io::Result<Vec<u8>>>);

    impl Read for Scripted {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(Ok(bytes)) => {
                    out[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_configured_baud_reaches_opener() {
        let (seen_tx, seen_rx) = mpsc::channel();
        let mut link = DeviceLink::new();
        link.connect_with(Path::new("/dev/ttyACM0"), 115_200, move |path, baud| {
            let _ = seen_tx.send((path.to_path_buf(), baud));
            Ok(Cursor::new(b"10,20,0\n".to_vec()))
        })
        .unwrap()
        .join()
        .unwrap();

        assert_eq!(seen_rx.recv().unwrap(), (PathBuf::from("/dev/ttyACM0"), 115_200));
        assert_eq!(
            link.drain(),
            vec![
                DeviceEvent::Opened,
                DeviceEvent::Data("10,20,0".into()),
                DeviceEvent::Closed,
            ]
        );
    }

    #[test]
    fn test_opener_failure_reports_error() {
        let mut link = DeviceLink::new();
        link.connect_with(Path::new("/dev/ttyUSB9"), 9_600, |_, _| {
            Err::<Cursor<Vec<u8>>, _>(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        })
        .unwrap()
        .join()
        .unwrap();
        let events = link.drain();
        assert!(matches!(&events[..], [DeviceEvent::Error(msg)] if msg.contains("/dev/ttyUSB9") && msg.contains("denied")));
        assert_eq!(link.state(), LinkState::Closed);
    }

    #[test]
    fn test_read_timeout_keeps_partial_line() {
        let script = Scripted(VecDeque::from(vec![
            Ok(b"51".to_vec()),
            Err(io::Error::new(io::ErrorKind::TimedOut, "quiet")),
            Ok(b"2,7,1\n".to_vec()),
            Err(io::Error::new(io::ErrorKind::TimedOut, "quiet")),
            Ok(b"0,0,0\n".to_vec()),
        ]));
        let mut link = DeviceLink::new();
        link.attach(BufReader::new(script)).unwrap().join().unwrap();
        assert_eq!(
            link.drain(),
            vec![
                DeviceEvent::Opened,
                DeviceEvent::Data("512,7,1".into()),
                DeviceEvent::Data("0,0,0".into()),
                DeviceEvent::Closed,
            ]
        );
    }

    #[test]
    fn test_attach_streams_lines_in_order() {
        let mut link = DeviceLink::new();
        let handle = link
            .attach(Cursor::new(b"512,512,1\r\n\n1023,0,0\n".to_vec()))
            .unwrap();
        assert_eq!(link.state(), LinkState::Connecting);
        handle.join().unwrap();

        let events = link.drain();
        assert_eq!(
            events,
            vec![
                DeviceEvent::Opened,
                DeviceEvent::Data("512,512,1".into()),
                DeviceEvent::Data("1023,0,0".into()),
                DeviceEvent::Closed,
            ]
        );
        assert_eq!(link.state(), LinkState::Closed);
        assert!(link.drain().is_empty());
    }

    #[test]
    fn test_unterminated_last_line() {
        let mut link = DeviceLink::new();
        link.attach(Cursor::new(b"1,2,3".to_vec()))
            .unwrap()
            .join()
            .unwrap();
        let events = link.drain();
        assert_eq!(events[1], DeviceEvent::Data("1,2,3".into()));
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let mut link = DeviceLink::new();
        link.attach(Cursor::new(vec![0xff, b'1', b',', b'2', b',', b'0', b'\n']))
            .unwrap()
            .join()
            .unwrap();
        let events = link.drain();
        assert!(matches!(&events[1], DeviceEvent::Data(s) if s.ends_with("1,2,0")));
        assert_eq!(events.last(), Some(&DeviceEvent::Closed));
    }

    #[test]
    fn test_missing_device_reports_error() {
        let mut link = DeviceLink::new();
        link.connect_path(Path::new("/nonexistent/orca-tty"), 115_200)
            .unwrap()
            .join()
            .unwrap();
        let events = link.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], DeviceEvent::Error(msg) if msg.contains("/nonexistent/orca-tty")));
        assert!(!link.is_open());
    }

    #[test]
    fn test_sender_feeds_same_queue() {
        let mut link = DeviceLink::new();
        let tx = link.sender();
        tx.send(DeviceEvent::Opened).unwrap();
        tx.send(DeviceEvent::Data("0,0,0".into())).unwrap();
        assert_eq!(link.drain().len(), 2);
        assert_eq!(link.state(), LinkState::Open);
    }
}

//! End-to-end delivery against a scripted in-process SMTP server.

#![allow(clippy::unwrap_used)]

use mailwright::error::Step;
use mailwright::{Error, Mailer, MailerConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// What the scripted server observed before the client hung up.
struct Session {
    commands: Vec<String>,
    data: String,
}

/// Accepts one connection and plays a permissive SMTP server, recording
/// every command line and the DATA payload.
async fn scripted_server(listener: TcpListener) -> Session {
    let (socket, _) = listener.accept().await.unwrap();
    let mut reader = BufReader::new(socket);
    reader
        .get_mut()
        .write_all(b"220 test ESMTP\r\n")
        .await
        .unwrap();

    let mut commands = Vec::new();
    let mut data = String::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await.unwrap() == 0 {
            break;
        }
        let line = line.trim_end().to_string();
        let verb = line.split(' ').next().unwrap_or_default().to_uppercase();
        commands.push(line);

        match verb.as_str() {
            "EHLO" => {
                reader
                    .get_mut()
                    .write_all(b"250-test greets you\r\n250 AUTH PLAIN\r\n")
                    .await
                    .unwrap();
            }
            "AUTH" => {
                reader
                    .get_mut()
                    .write_all(b"235 2.7.0 accepted\r\n")
                    .await
                    .unwrap();
            }
            "DATA" => {
                reader
                    .get_mut()
                    .write_all(b"354 go ahead\r\n")
                    .await
                    .unwrap();
                loop {
                    let mut body_line = String::new();
                    reader.read_line(&mut body_line).await.unwrap();
                    if body_line == ".\r\n" {
                        break;
                    }
                    data.push_str(&body_line);
                }
                reader
                    .get_mut()
                    .write_all(b"250 queued\r\n")
                    .await
                    .unwrap();
            }
            "QUIT" => {
                reader.get_mut().write_all(b"221 bye\r\n").await.unwrap();
                break;
            }
            _ => {
                reader.get_mut().write_all(b"250 ok\r\n").await.unwrap();
            }
        }
    }

    Session { commands, data }
}

fn config(port: u16, secure: bool) -> MailerConfig {
    MailerConfig {
        host: "127.0.0.1".to_string(),
        port,
        username: "user".to_string(),
        password: "pass".to_string(),
        from_address: "from@example.com".to_string(),
        from_name: "Example".to_string(),
        secure,
    }
}

#[tokio::test]
async fn plaintext_send_drives_full_session() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(scripted_server(listener));

    let mailer = Mailer::new(config(port, false)).unwrap();
    mailer
        .send("<p>Test</p>", "Test", "Test", "user@example.com")
        .await
        .unwrap();

    let session = server.await.unwrap();
    assert_eq!(
        session.commands,
        vec![
            "EHLO localhost",
            // base64("\0user\0pass")
            "AUTH PLAIN AHVzZXIAcGFzcw==",
            "MAIL FROM:<from@example.com>",
            "RCPT TO:<user@example.com>",
            "DATA",
            "QUIT",
        ]
    );

    assert!(
        session
            .data
            .starts_with("From: Example <from@example.com>\r\n")
    );
    assert!(session.data.contains("To: user@example.com\r\n"));
    assert!(session.data.contains("Subject: Test\r\n"));
    assert!(
        session
            .data
            .contains("Content-Type: multipart/alternative; boundary=")
    );

    let text_at = session.data.find("Content-Type: text/plain").unwrap();
    let html_at = session.data.find("Content-Type: text/html").unwrap();
    assert!(text_at < html_at);
}

#[tokio::test]
async fn tls_dial_failure_is_tagged_and_stops_the_attempt() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // Accept and immediately drop the socket: the TLS handshake can never
    // complete, so the attempt must die at the dial step.
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        drop(socket);
    });

    let mailer = Mailer::new(config(port, true)).unwrap();
    let err = mailer
        .send("<p>Test</p>", "Test", "Test", "user@example.com")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Transport {
            step: Step::Dial,
            ..
        }
    ));
    assert!(err.to_string().contains("dial"));

    server.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn silent_server_times_out_at_the_greeting() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // Accept and hold the connection open without ever greeting. With the
    // clock paused the step timer is the only thing left to fire, so the
    // test does not actually wait out the timeout.
    let server = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        std::future::pending::<()>().await;
    });

    let mailer = Mailer::new(config(port, false)).unwrap();
    let err = mailer
        .send("<p>Test</p>", "Test", "Test", "user@example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { step: Step::Greet }));
    assert!(err.to_string().contains("greet"));

    server.abort();
}

#[tokio::test]
async fn server_rejection_surfaces_with_step() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut reader = BufReader::new(socket);
        reader
            .get_mut()
            .write_all(b"220 test ESMTP\r\n")
            .await
            .unwrap();

        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).await.unwrap() == 0 {
                break;
            }
            let reply: &[u8] = if line.starts_with("EHLO") {
                b"250 test\r\n"
            } else if line.starts_with("AUTH") {
                b"235 accepted\r\n"
            } else if line.starts_with("MAIL") {
                b"250 ok\r\n"
            } else if line.starts_with("RCPT") {
                b"550 5.1.1 no such user\r\n"
            } else {
                b"221 bye\r\n"
            };
            reader.get_mut().write_all(reply).await.unwrap();
        }
    });

    let mailer = Mailer::new(config(port, false)).unwrap();
    let err = mailer
        .send("<p>Test</p>", "Test", "Test", "nobody@example.com")
        .await
        .unwrap_err();

    match err {
        Error::Transport {
            step: Step::RcptTo,
            source,
        } => assert!(source.to_string().contains("550")),
        other => panic!("expected RCPT TO failure, got {other}"),
    }

    drop(server);
}

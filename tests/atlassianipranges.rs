use assert_cmd::Command;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/*-------------------------------------------------------------------------------------------------
  Test IP Ranges Endpoint
-------------------------------------------------------------------------------------------------*/

const TEST_JSON: &str = r#"{
  "creationDate": "2024-05-16T01:41:25.253014",
  "syncToken": 1715823685,
  "items": [
    {"network": "13.52.5.0", "mask_len": 24, "cidr": "13.52.5.0/24", "mask": "255.255.255.0",
     "region": ["us-west-1"], "product": ["jira"], "direction": ["ingress"], "perimeter": "global"},
    {"network": "2620:5c:0::", "mask_len": 48, "cidr": "2620:5c:0::/48", "mask": "ffff:ffff:ffff::",
     "region": ["global"], "product": ["confluence"], "direction": ["ingress"], "perimeter": "global"},
    {"network": "18.184.99.128", "mask_len": 25, "cidr": "18.184.99.128/25", "mask": "255.255.255.128",
     "region": ["eu-central-1"], "product": ["jira"], "direction": ["egress"], "perimeter": "global"},
    {"network": "104.192.136.0", "mask_len": 21, "cidr": "104.192.136.0/21", "mask": "255.255.248.0",
     "region": ["global"], "product": ["bitbucket"], "direction": ["ingress"], "perimeter": "global"},
    {"network": "", "mask_len": 24, "cidr": "13.52.6.0/24", "mask": "255.255.255.0",
     "region": ["us-west-1"], "product": ["bitbucket"], "direction": ["ingress"], "perimeter": "global"}
  ]
}"#;

/// Serve one canned HTTP response on a local port and return its URL.
fn serve(status: u16, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let body = body.to_string();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).is_ok_and(|n| n > 0) && line != "\r\n" {
                line.clear();
            }

            let response = format!(
                "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    url
}

fn command(url: &str) -> Command {
    let mut command = Command::cargo_bin("atlassianipranges").unwrap();
    command.env("ATLASSIANIPRANGES_URL", url);
    command
}

fn stdout_lines(command: &mut Command) -> Vec<String> {
    let output = command.assert().success().get_output().stdout.clone();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| line.to_string())
        .collect()
}

/*-------------------------------------------------------------------------------------------------
  atlassianipranges Binary Tests
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  No Arguments - Display the Default Filter Results
--------------------------------------------------------------------------------------*/

#[test]
fn command_no_args() {
    command(&serve(200, TEST_JSON)).assert().success();
}

/*--------------------------------------------------------------------------------------
  Version
--------------------------------------------------------------------------------------*/

#[test]
fn command_version() {
    Command::cargo_bin("atlassianipranges")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

/*--------------------------------------------------------------------------------------
  Output Formats
--------------------------------------------------------------------------------------*/

/*-----------------------------------------------------------------------------
  Output: CIDR
-----------------------------------------------------------------------------*/

#[test]
fn command_output_cidr() {
    let lines = stdout_lines(
        command(&serve(200, TEST_JSON))
            .arg("--output")
            .arg("cidr"),
    );

    assert_eq!(lines, vec!["13.52.5.0/24", "2620:5c:0::/48"]);
}

/*-----------------------------------------------------------------------------
  Output: Netmask
-----------------------------------------------------------------------------*/

#[test]
fn command_output_netmask() {
    let lines = stdout_lines(
        command(&serve(200, TEST_JSON))
            .arg("--ipv4")
            .arg("--output")
            .arg("netmask"),
    );

    assert_eq!(lines, vec!["13.52.5.0 255.255.255.0"]);
}

/*-----------------------------------------------------------------------------
  Output: JSON
-----------------------------------------------------------------------------*/

#[test]
fn command_output_json() {
    let lines = stdout_lines(
        command(&serve(200, TEST_JSON))
            .arg("--output")
            .arg("json"),
    );
    let data: serde_json::Value = serde_json::from_str(&lines.join("\n")).unwrap();

    assert_eq!(data["id"], "1715823685");
    assert_eq!(data["ipv4_cidr_blocks"], serde_json::json!(["13.52.5.0/24"]));
    assert_eq!(data["ipv6_cidr_blocks"], serde_json::json!(["2620:5c:0::/48"]));
    assert_eq!(
        data["cidr_blocks"],
        serde_json::json!(["13.52.5.0/24", "2620:5c:0::/48"])
    );
}

/*-----------------------------------------------------------------------------
  Output: Table with Summary
-----------------------------------------------------------------------------*/

#[test]
fn command_output_table_summary() {
    let lines = stdout_lines(
        command(&serve(200, TEST_JSON))
            .arg("--output")
            .arg("table")
            .arg("--summary"),
    );
    let stdout = lines.join("\n");

    assert!(stdout.contains("13.52.5.0/24"));
    assert!(stdout.contains("1715823685"));
}

/*--------------------------------------------------------------------------------------
  Filter
--------------------------------------------------------------------------------------*/

/*-----------------------------------------------------------------------------
  Filter: IPv6
-----------------------------------------------------------------------------*/

#[test]
fn command_filter_ipv6() {
    let lines = stdout_lines(
        command(&serve(200, TEST_JSON))
            .arg("--ipv6")
            .arg("--output")
            .arg("cidr"),
    );

    assert_eq!(lines, vec!["2620:5c:0::/48"]);
}

/*-----------------------------------------------------------------------------
  Filter: Direction
-----------------------------------------------------------------------------*/

#[test]
fn command_filter_direction() {
    let lines = stdout_lines(
        command(&serve(200, TEST_JSON))
            .arg("--direction")
            .arg("egress")
            .arg("--output")
            .arg("cidr"),
    );

    assert_eq!(lines, vec!["18.184.99.128/25"]);
}

/*-----------------------------------------------------------------------------
  Filter: Product - unparseable network addresses are only in the combined set
-----------------------------------------------------------------------------*/

#[test]
fn command_filter_product() {
    let url = serve(200, TEST_JSON);
    let lines = stdout_lines(
        command(&url)
            .arg("--product")
            .arg("Bitbucket")
            .arg("--output")
            .arg("cidr"),
    );
    assert_eq!(lines, vec!["104.192.136.0/21", "13.52.6.0/24"]);

    let url = serve(200, TEST_JSON);
    let lines = stdout_lines(
        command(&url)
            .arg("--product")
            .arg("bitbucket")
            .arg("--ipv4")
            .arg("--output")
            .arg("cidr"),
    );
    assert_eq!(lines, vec!["104.192.136.0/21"]);
}

/*--------------------------------------------------------------------------------------
  Errors
--------------------------------------------------------------------------------------*/

#[test]
fn command_not_found() {
    command(&serve(404, "Not Found"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn command_malformed_document() {
    command(&serve(200, "<html>Service Unavailable</html>"))
        .assert()
        .failure()
        .code(1);
}

/*--------------------------------------------------------------------------------------
  Save to CSV
--------------------------------------------------------------------------------------*/

#[test]
fn command_save_to_csv() {
    let directory = tempfile::tempdir().unwrap();
    let csv_file = directory.path().join("command_save_to_csv.csv");

    command(&serve(200, TEST_JSON))
        .arg("--output")
        .arg("cidr")
        .arg("--csv")
        .arg(&csv_file)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&csv_file).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec!["CIDR,Address Family", "13.52.5.0/24,IPv4", "2620:5c:0::/48,IPv6"]
    );
}

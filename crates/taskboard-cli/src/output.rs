use serde::Serialize;

#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

fn encode<T: Serialize>(response: &CliResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"api_version":"{}","error":"failed to encode response: {}"}}"#,
            env!("CARGO_PKG_VERSION"),
            e.to_string().replace('"', "'")
        )
    })
}

/// Success reply as a single JSON line.
pub fn success_line<T: Serialize>(data: T) -> String {
    encode(&CliResponse {
        success: true,
        api_version: env!("CARGO_PKG_VERSION"),
        data: Some(data),
        error: None,
    })
}

/// Error reply as a single JSON line.
pub fn error_line(message: &str) -> String {
    encode::<()>(&CliResponse {
        success: false,
        api_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: Some(message.to_string()),
    })
}

pub fn output_success<T: Serialize>(data: T) {
    println!("{}", success_line(data));
}

pub fn output_list<T: Serialize>(items: Vec<T>) {
    let count = items.len();
    let list = ListResponse { items, count };
    output_success(list);
}

/// Print an error reply to stderr and exit with status 1.
pub fn output_error(message: &str) -> ! {
    eprintln!("{}", error_line(message));
    std::process::exit(1);
}

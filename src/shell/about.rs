pub const TITLE: &str = "AI Model Memory Calculator";

pub const FORMULA: &str = "Formula: M = (P × 4) / (32/Q) × 1.2";

pub const VARIABLES: &str = "Variables:
• M - GPU memory required (in GB)
• P - Number of parameters in the model (billions)
• 4 - 4 bytes used for each parameter
• 32 - 32 bits in 4 bytes
• Q - Quantization bits (32, 16, 8, or 4 bits)
• 1.2 - 20% overhead for additional data in GPU memory";

pub const CONTACT: &str = "contact: voltakai@pm.me";

pub fn about_text() -> String {
    format!("About AI Memorator\n\n{FORMULA}\n\n{VARIABLES}\n\nAI Memorator v{}\n{CONTACT}", env!("CARGO_PKG_VERSION"))
}

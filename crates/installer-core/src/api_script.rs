//! The local LLM API server script written next to the llama.cpp build.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::layout::normalize_lexically;

/// Values substituted into the generated server script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiScriptParams {
    pub model_path: PathBuf,
    pub inference_binary: PathBuf,
}

impl ApiScriptParams {
    /// Resolves `../models/<file>` and `../build/main` against `api_dir`, which
    /// must be absolute.
    pub fn resolve(api_dir: &Path, model_filename: &str) -> Self {
        Self {
            model_path: normalize_lexically(&api_dir.join("../models").join(model_filename)),
            inference_binary: normalize_lexically(&api_dir.join("../build/main")),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Double-quoted string literal valid in Python and JavaScript source.
pub(crate) fn quoted_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn path_literal(path: &Path) -> String {
    quoted_literal(&path.to_string_lossy())
}

const SCRIPT_HEAD: &str = "from flask import Flask, request, jsonify
import subprocess

app = Flask(__name__)
";

const SCRIPT_BODY: &str = "
@app.route('/api/llm', methods=['POST'])
def llm():
    prompt = (request.get_json(silent=True) or {}).get('prompt', '')
    if not prompt:
        return jsonify({'error': 'No prompt'}), 400
    proc = subprocess.Popen([
        LLAMA_BIN, '-m', MODEL_PATH, '-p', prompt, '-n', '128', '--temp', '0.7',
        '--top_k', '40', '--top_p', '0.95', '--repeat_penalty', '1.1',
        '--color', 'never', '--silent-prompt'
    ], stdout=subprocess.PIPE, stderr=subprocess.PIPE)
    try:
        out, err = proc.communicate(timeout=60)
    except subprocess.TimeoutExpired:
        proc.kill()
        return jsonify({'error': 'Timed out'}), 504
    if proc.returncode != 0:
        return jsonify({'error': err.decode()}), 500
    return jsonify({'response': out.decode().strip()})

if __name__ == '__main__':
    app.run(host='127.0.0.1', port=8088)
";

impl fmt::Display for ApiScriptParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SCRIPT_HEAD)?;
        writeln!(f, "MODEL_PATH = {}", path_literal(&self.model_path))?;
        writeln!(f, "LLAMA_BIN = {}", path_literal(&self.inference_binary))?;
        f.write_str(SCRIPT_BODY)
    }
}

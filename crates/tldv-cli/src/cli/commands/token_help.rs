//! `tldv-dl token-help` – how to obtain the authorization token.

pub const TOKEN_HELP: &str = "\
How to get the Authorization token:

 1. Go to https://tldv.io/ and log in
 2. Open the meeting you want to download
 3. Open Developer Tools (F12 or right-click -> Inspect)
 4. Go to the 'Network' tab
 5. Refresh the page (F5)
 6. In the filter box, type: watch-page
 7. Look for a request to: ...meetings/.../watch-page?noTranscript=true
 8. Click on it -> Headers -> Request Headers
 9. Copy the entire \"Authorization\" value (starts with \"Bearer \")

Alternatively, look for auth-related cookies under Application/Storage, or in
Local/Session Storage.

Notes:
 - The token is tied to your browser session and expires when you log out
 - One token works for every download in the same session
 - If downloads start failing with 'unauthorized', refresh the page and copy a fresh token";

pub fn run_token_help() {
    println!("{TOKEN_HELP}");
}

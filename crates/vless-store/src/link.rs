//! Access link construction.

use uuid::Uuid;
use vless_core::defaults;

/// Build the shareable connection link for a credential.
///
/// The format is fixed: one line, no internal whitespace, every
/// parameter except the address, public key, and fragment is a literal.
pub fn access_link(uuid: &Uuid, server_addr: &str, public_key: &str, username: &str) -> String {
    format!(
        "{scheme}://{uuid}@{addr}:{port}?encryption=none&flow={flow}&security=reality&sni={sni}&fp={fp}&pbk={pbk}&sid={sid}&type=tcp&headerType=none#{username}",
        scheme = defaults::VLESS_SCHEME,
        uuid = uuid,
        addr = server_addr,
        port = defaults::VLESS_PORT,
        flow = defaults::VLESS_FLOW,
        sni = defaults::REALITY_SNI,
        fp = defaults::REALITY_FINGERPRINT,
        pbk = public_key,
        sid = defaults::REALITY_SHORT_ID,
        username = username,
    )
}

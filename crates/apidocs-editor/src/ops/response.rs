//! Response, content type and named example edits.

use crate::error::{EditError, NameKind, Outcome};
use crate::model::{Endpoint, MediaContent, NamedExample, Response};
use crate::ops::{check_new, check_rename, rename_entry};

/// Add a response with one empty `content_type` entry.
pub fn add_response(
    endpoint: &mut Endpoint,
    code: &str,
    content_type: &str,
) -> Result<(), EditError> {
    let code = check_new(NameKind::ResponseCode, code, |c| {
        endpoint.responses.contains_key(c)
    })?;
    endpoint
        .responses
        .insert(code.to_string(), Response::with_content_type(content_type));
    Ok(())
}

pub fn remove_response(endpoint: &mut Endpoint, code: &str) -> Outcome {
    match endpoint.responses.shift_remove(code) {
        Some(_) => Outcome::Applied,
        None => Outcome::Stale,
    }
}

pub fn rename_response_code(
    endpoint: &mut Endpoint,
    from: &str,
    to: &str,
) -> Result<Outcome, EditError> {
    if !endpoint.responses.contains_key(from) {
        return Ok(Outcome::Stale);
    }
    match check_rename(NameKind::ResponseCode, from, to, |c| {
        endpoint.responses.contains_key(c)
    })? {
        Some(to) => Ok(rename_entry(&mut endpoint.responses, from, to)),
        None => Ok(Outcome::Applied),
    }
}

// ── Content types ─────────────────────────────────────────────────────────

pub fn add_content_type(response: &mut Response, content_type: &str) -> Result<(), EditError> {
    let content_type = check_new(NameKind::ContentType, content_type, |ct| {
        response.content.contains_key(ct)
    })?;
    response
        .content
        .insert(content_type.to_string(), MediaContent::default());
    Ok(())
}

pub fn rename_content_type(
    response: &mut Response,
    from: &str,
    to: &str,
) -> Result<Outcome, EditError> {
    if !response.content.contains_key(from) {
        return Ok(Outcome::Stale);
    }
    match check_rename(NameKind::ContentType, from, to, |ct| {
        response.content.contains_key(ct)
    })? {
        Some(to) => Ok(rename_entry(&mut response.content, from, to)),
        None => Ok(Outcome::Applied),
    }
}

/// # Errors
///
/// [`EditError::LastContentType`] when `content_type` is the only entry.
pub fn remove_content_type(
    response: &mut Response,
    content_type: &str,
) -> Result<Outcome, EditError> {
    if !response.content.contains_key(content_type) {
        return Ok(Outcome::Stale);
    }
    if response.content.len() == 1 {
        return Err(EditError::LastContentType);
    }
    response.content.shift_remove(content_type);
    Ok(Outcome::Applied)
}

// ── Named examples ────────────────────────────────────────────────────────

/// Add an example with an empty summary and `{}` as its value.
pub fn add_example(media: &mut MediaContent, name: &str) -> Result<(), EditError> {
    let name = check_new(NameKind::Example, name, |n| media.examples.contains_key(n))?;
    media
        .examples
        .insert(name.to_string(), NamedExample::default());
    Ok(())
}

pub fn rename_example(
    media: &mut MediaContent,
    from: &str,
    to: &str,
) -> Result<Outcome, EditError> {
    if !media.examples.contains_key(from) {
        return Ok(Outcome::Stale);
    }
    match check_rename(NameKind::Example, from, to, |n| media.examples.contains_key(n))? {
        Some(to) => Ok(rename_entry(&mut media.examples, from, to)),
        None => Ok(Outcome::Applied),
    }
}

pub fn remove_example(media: &mut MediaContent, name: &str) -> Outcome {
    match media.examples.shift_remove(name) {
        Some(_) => Outcome::Applied,
        None => Outcome::Stale,
    }
}

pub fn update_example_summary(example: &mut NamedExample, summary: &str) {
    example.summary = summary.to_string();
}

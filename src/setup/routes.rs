//! Generated route files
//!
//! The two route handlers are fixed contracts with the host application.
//! Their bodies live here as versioned templates; only the alias name is
//! interpolated.

use crate::error::{IoContext, Result};
use crate::setup::alias::ALIAS_PREFIX;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Placeholder substituted with the installed folder name
const ALIAS_PLACEHOLDER: &str = "{{alias}}";

/// Bump when a route body changes shape
pub const ROUTE_TEMPLATE_VERSION: u8 = 1;

const NEXTAUTH_ROUTE: &str = r#"import NextAuth from "next-auth";
import { options } from "{{alias}}/api/auth/[...nextauth]/options";

const handler = NextAuth(options);
export { handler as GET, handler as POST };
"#;

const SESSION_UPDATE_ROUTE: &str = r#"import { getServerSession } from 'next-auth';
import { NextResponse } from 'next/server';
import { options } from '{{alias}}/api/auth/[...nextauth]/options';
import dbConnect from '{{alias}}/lib/db';
import { getUserByUsernameForSessionAction } from '{{alias}}/helper/userAction';

export async function GET() {
    try {
        await dbConnect();
        const session = await getServerSession(options);

        if (!session?.user?.username) {
            return NextResponse.json({ status: 'unauthenticated' }, { status: 401 });
        }

        const user = await getUserByUsernameForSessionAction(session.user.username);
        if (!user) {
            return NextResponse.json({ status: 'notFound' }, { status: 404 });
        }
        const payload = user.payload;

        return NextResponse.json(
            {
                status: 'success',
                user: {
                    id: payload?.id.toString(),
                    username: payload?.username,
                    name: payload?.name,
                    email: payload?.email,
                    phoneNumber: payload?.phoneNumber,
                    avatar: payload?.avatar,
                    securityStamp: payload?.securityStamp,
                    roles: payload?.roles,
                    claims: payload?.claims,
                    emailConfirmed: payload?.emailConfirmed,
                    phoneNumberConfirmed: payload?.phoneNumberConfirmed,
                    twoFactorEnabled: payload?.twoFactorEnabled,
                },
            },
            { status: 200 }
        );
    } catch (error) {
        return NextResponse.json(
            { status: 'error', message: 'Internal server error' },
            { status: 500 }
        );
    }
}
"#;

/// A generated route file: where it goes and what it contains
#[derive(Debug, Clone, Copy)]
pub struct RouteTemplate {
    /// Path segments below the project source folder
    pub segments: &'static [&'static str],
    pub body: &'static str,
}

impl RouteTemplate {
    pub fn relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Body with every alias placeholder replaced by `@/<alias>`
    pub fn render(&self, alias: &str) -> String {
        self.body.replace(ALIAS_PLACEHOLDER, &format!("{}{}", ALIAS_PREFIX, alias))
    }
}

/// Get all generated route templates
pub fn get_route_templates() -> Vec<RouteTemplate> {
    vec![
        RouteTemplate {
            segments: &["app", "api", "auth", "[...nextauth]", "route.ts"],
            body: NEXTAUTH_ROUTE,
        },
        RouteTemplate {
            segments: &["app", "api", "session", "update", "route.ts"],
            body: SESSION_UPDATE_ROUTE,
        },
    ]
}

/// Parent folders the route files need, in template order
pub fn route_dirs(source_root: &Path) -> Vec<PathBuf> {
    get_route_templates()
        .iter()
        .filter_map(|t| source_root.join(t.relative_path()).parent().map(Path::to_path_buf))
        .collect()
}

/// Write every route file under `source_root`, overwriting existing ones
///
/// Parent folders must already exist.
pub fn emit_route_files(source_root: &Path, alias: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for template in get_route_templates() {
        let path = source_root.join(template.relative_path());
        fs::write(&path, template.render(alias)).io_context("write", &path)?;
        debug!("Wrote route file {} (v{})", path.display(), ROUTE_TEMPLATE_VERSION);
        written.push(path);
    }
    Ok(written)
}

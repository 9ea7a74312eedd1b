//! Embedded HTML frontend.
//!
//! Three pages, each a static HTML string with inline CSS and JavaScript —
//! no external assets. The dashboard template carries a `__TREE_DATA__`
//! placeholder that [`render_dashboard`] fills with the serialized tree.

use linkdeck_store::LinkTree;

/// The login page.
pub const LOGIN_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Linkdeck</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{
  --bg:#12141f;
  --panel:#1b1e2e;
  --border:#2b2f45;
  --text:#e6e8f0;
  --muted:#8c90a8;
  --accent:#5b6cf0;
  --accent-hover:#7584ff;
  --danger:#e45b6c;
}
html,body{height:100%;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:var(--bg);color:var(--text)}
body{display:flex;align-items:center;justify-content:center}
.card{width:100%;max-width:380px;margin:16px;background:var(--panel);border:1px solid var(--border);border-radius:14px;padding:32px 28px}
h1{text-align:center;font-size:1.5rem;letter-spacing:.1em;margin-bottom:20px}
h1 span{color:var(--accent)}
form{display:flex;flex-direction:column;gap:12px}
input{padding:12px 14px;border-radius:9px;border:1px solid var(--border);background:var(--bg);color:var(--text);font-size:1rem;outline:none}
input:focus{border-color:var(--accent)}
button{padding:12px;border:none;border-radius:9px;cursor:pointer;font-weight:700;font-size:1rem;color:#fff;background:var(--accent)}
button:hover{background:var(--accent-hover)}
.hint{margin-top:14px;color:var(--muted);font-size:.85rem;text-align:center}
</style>
</head>
<body>
  <div class="card">
    <h1>LINK<span>DECK</span></h1>
    <form action="/login" method="POST">
      <input name="user" placeholder="Username" autocomplete="username" required>
      <input name="pass" type="password" placeholder="Password" autocomplete="current-password" required>
      <button type="submit">Sign in</button>
    </form>
    <div class="hint">First login: admin / admin123456 (a password change is required)</div>
  </div>
</body>
</html>"##;

/// The forced password-change page, shown while the session carries the
/// must-change flag.
pub const CHANGE_PASSWORD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Linkdeck</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{
  --bg:#12141f;--panel:#1b1e2e;--border:#2b2f45;--text:#e6e8f0;
  --muted:#8c90a8;--accent:#5b6cf0;--danger:#e45b6c;--ok:#59c98b;
}
html,body{height:100%;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:var(--bg);color:var(--text)}
body{display:flex;align-items:center;justify-content:center}
.card{width:100%;max-width:420px;margin:16px;background:var(--panel);border:1px solid var(--border);border-radius:14px;padding:28px}
h1{font-size:1.15rem;text-align:center;margin-bottom:16px}
.g{display:flex;flex-direction:column;gap:12px}
input{padding:12px 14px;border-radius:9px;border:1px solid var(--border);background:var(--bg);color:var(--text);font-size:1rem;outline:none}
input:focus{border-color:var(--accent)}
button{padding:12px;border:none;border-radius:9px;cursor:pointer;font-weight:700;font-size:1rem;color:#fff;background:var(--accent)}
.msg{margin-top:12px;color:var(--danger);font-weight:700;display:none;text-align:center}
.msg.ok{color:var(--ok)}
</style>
</head>
<body>
  <div class="card">
    <h1>Change password</h1>
    <div class="g">
      <input id="oldPass" type="password" placeholder="Current password" autocomplete="current-password">
      <input id="newPass" type="password" placeholder="New password (8+ characters)" autocomplete="new-password">
      <button id="save">Save</button>
    </div>
    <div class="msg" id="msg"></div>
  </div>
  <script>
    const msg = document.getElementById('msg');
    const show = (text, ok = false) => {
      msg.textContent = text;
      msg.style.display = 'block';
      msg.className = 'msg' + (ok ? ' ok' : '');
    };
    document.getElementById('save').onclick = async () => {
      const oldPass = document.getElementById('oldPass').value;
      const newPass = document.getElementById('newPass').value;
      try {
        const res = await fetch('/api/change-password', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ oldPass, newPass })
        });
        const out = await res.json().catch(() => ({}));
        if (!res.ok) return show(out.error || 'Save failed');
        show('Saved', true);
        setTimeout(() => location.href = '/', 400);
      } catch (e) {
        show('Network error');
      }
    };
  </script>
</body>
</html>"##;

/// Dashboard template; `__TREE_DATA__` is replaced with the tree JSON.
const DASHBOARD_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Linkdeck</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{
  --bg:#12141f;--panel:#1b1e2e;--panel2:#232740;--border:#2b2f45;
  --text:#e6e8f0;--muted:#8c90a8;--accent:#5b6cf0;--accent-hover:#7584ff;
  --danger:#e45b6c;
}
html.light{
  --bg:#f3f4f8;--panel:#ffffff;--panel2:#e9ebf3;--border:#d5d9e6;
  --text:#21243a;--muted:#6a6f88;
}
html,body{min-height:100%;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:var(--bg);color:var(--text)}
.topbar{display:flex;align-items:center;justify-content:space-between;padding:16px 22px;border-bottom:1px solid var(--border);background:var(--panel)}
.searchbar{max-width:640px;margin:22px auto 0;padding:0 22px}
.searchbar input{width:100%;padding:13px 18px;border-radius:999px;border:1px solid var(--border);background:var(--panel);color:var(--text);font-size:1rem;outline:none}
.searchbar input:focus{border-color:var(--accent)}
.topbar h1{font-size:1.2rem;letter-spacing:.1em}
.topbar h1 span{color:var(--accent)}
.actions{display:flex;gap:10px}
.pill{border:1px solid var(--border);background:var(--panel2);color:var(--text);padding:8px 14px;border-radius:999px;text-decoration:none;font-size:.88rem;font-weight:700;cursor:pointer}
.pill:hover{border-color:var(--accent)}
.pill.danger:hover{border-color:var(--danger);color:var(--danger)}
main{max-width:1100px;margin:0 auto;padding:20px 22px 80px}
.section-title{display:flex;align-items:center;gap:10px;margin:24px 0 12px;font-size:1.05rem;font-weight:800;border-left:4px solid var(--accent);padding-left:10px}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(210px,1fr));gap:12px;min-height:52px;border-radius:10px}
.grid.dragover{outline:2px dashed var(--accent);outline-offset:4px}
.card{position:relative;display:flex;align-items:center;gap:10px;padding:14px;background:var(--panel);border:1px solid var(--border);border-radius:12px;color:var(--text);text-decoration:none;min-height:66px}
.card:hover{border-color:var(--accent)}
.card.dragging{opacity:.5}
.card img{width:24px;height:24px;border-radius:6px;flex:0 0 auto}
.meta{min-width:0}
.title{font-weight:700;white-space:nowrap;overflow:hidden;text-overflow:ellipsis}
.url{color:var(--muted);font-size:.78rem;white-space:nowrap;overflow:hidden;text-overflow:ellipsis}
.tools{position:absolute;top:6px;right:6px;display:none;gap:4px}
.card:hover .tools{display:flex}
.mini{width:26px;height:26px;border:1px solid var(--border);border-radius:7px;background:var(--panel2);color:var(--text);cursor:pointer;font-size:.8rem}
.mini.d:hover{border-color:var(--danger);color:var(--danger)}
.empty{color:var(--muted);font-size:.88rem;padding:8px 2px}
.fab{position:fixed;right:20px;bottom:20px}
.fab button{border:none;border-radius:999px;padding:13px 18px;cursor:pointer;font-weight:800;color:#fff;background:var(--accent);font-size:.95rem}
.fab button:hover{background:var(--accent-hover)}
.mask{position:fixed;inset:0;background:rgba(0,0,0,.55);display:none;align-items:center;justify-content:center;padding:16px;z-index:10}
.mask.open{display:flex}
.modal{width:100%;max-width:480px;background:var(--panel);border:1px solid var(--border);border-radius:14px;overflow:hidden}
.modal header{display:flex;align-items:center;justify-content:space-between;padding:14px 16px;border-bottom:1px solid var(--border)}
.modal header h3{font-size:1rem}
.modal .body{padding:16px;display:flex;flex-direction:column;gap:12px}
.modal footer{display:flex;justify-content:flex-end;gap:10px;padding:12px 16px;border-top:1px solid var(--border)}
label{color:var(--muted);font-size:.82rem;font-weight:700;display:block;margin-bottom:5px}
input,select{width:100%;padding:11px 12px;border-radius:9px;border:1px solid var(--border);background:var(--bg);color:var(--text);font-size:.95rem;outline:none}
input:focus,select:focus{border-color:var(--accent)}
.btn{border:none;border-radius:9px;padding:10px 14px;cursor:pointer;font-weight:700}
.btn.secondary{background:var(--panel2);border:1px solid var(--border);color:var(--text)}
.btn.primary{background:var(--accent);color:#fff}
.cat-row{display:flex;align-items:center;justify-content:space-between;gap:10px;padding:11px 12px;border:1px solid var(--border);border-radius:10px;background:var(--panel2);margin-bottom:8px;cursor:grab}
.cat-row.dragging{opacity:.5}
.toast{position:fixed;left:50%;bottom:18px;transform:translateX(-50%);background:var(--panel);border:1px solid var(--border);padding:10px 14px;border-radius:10px;display:none;font-weight:700;z-index:20}
</style>
</head>
<body>
  <div class="topbar">
    <h1>LINK<span>DECK</span></h1>
    <div class="actions">
      <button class="pill" id="btnTheme" title="Toggle light/dark theme">Theme</button>
      <button class="pill" id="btnManage">Manage categories</button>
      <a class="pill danger" href="/logout">Log out</a>
    </div>
  </div>

  <div class="searchbar">
    <form action="https://www.google.com/search" method="GET" target="_blank" rel="noopener">
      <input name="q" placeholder="Search Google..." autocomplete="off">
    </form>
  </div>

  <main id="main"></main>

  <div class="fab"><button id="btnAdd">+ Add link</button></div>

  <div class="mask" id="maskLink">
    <div class="modal">
      <header><h3 id="linkModalTitle">Add link</h3><button class="mini" id="closeLink">x</button></header>
      <div class="body">
        <div><label>Category</label><select id="linkCategory"></select></div>
        <div><label>New category (optional)</label><input id="newCategory" placeholder="e.g. Work"></div>
        <div><label>Title</label><input id="linkTitle" placeholder="e.g. Mail"></div>
        <div><label>URL</label><input id="linkUrl" placeholder="https://example.com"></div>
        <div><label>Icon (optional)</label><input id="linkIcon" placeholder="leave blank for favicon"></div>
      </div>
      <footer>
        <button class="btn secondary" id="cancelLink">Cancel</button>
        <button class="btn primary" id="saveLink">Save</button>
      </footer>
    </div>
  </div>

  <div class="mask" id="maskCats">
    <div class="modal">
      <header><h3>Manage categories</h3><button class="mini" id="closeCats">x</button></header>
      <div class="body"><div id="catlist"></div></div>
      <footer>
        <button class="btn secondary" id="cancelCats">Cancel</button>
        <button class="btn primary" id="saveCats">Save order</button>
      </footer>
    </div>
  </div>

  <div class="toast" id="toast"></div>

  <script>
    const state = { data: __TREE_DATA__, editing: null, catOrder: null };

    const main = document.getElementById('main');
    const toastEl = document.getElementById('toast');
    const maskLink = document.getElementById('maskLink');
    const maskCats = document.getElementById('maskCats');
    const linkCategory = document.getElementById('linkCategory');

    function toast(msg) {
      toastEl.textContent = msg;
      toastEl.style.display = 'block';
      clearTimeout(window.__t);
      window.__t = setTimeout(() => toastEl.style.display = 'none', 1600);
    }
    const esc = s => String(s).replace(/[&<>"']/g, c =>
      ({ '&':'&amp;', '<':'&lt;', '>':'&gt;', '"':'&quot;', "'":'&#39;' }[c]));
    const origin = u => { try { return new URL(u).origin } catch { return u } };

    async function api(method, path, body) {
      const res = await fetch(path, {
        method,
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      const out = await res.json().catch(() => ({}));
      if (res.status === 401) { location.href = '/'; throw new Error('unauthorized'); }
      if (!res.ok) { toast(out.error || 'Request failed'); throw new Error(out.error || 'failed'); }
      return out;
    }

    function findLink(linkId) {
      for (const c of state.data.categories) {
        const link = (c.links || []).find(l => l.id === linkId);
        if (link) return { cat: c, link };
      }
      return null;
    }

    function render() {
      const cats = state.data.categories || [];
      linkCategory.innerHTML = cats.map(c =>
        `<option value="${esc(c.id)}">${esc(c.name)}</option>`).join('');

      main.innerHTML = cats.map(c => {
        const cards = (c.links || []).map(l => `
          <a class="card" href="${esc(l.url)}" target="_blank" rel="noopener"
             draggable="true" data-link-id="${esc(l.id)}" data-cat-id="${esc(c.id)}">
            <div class="tools">
              <button class="mini" data-action="edit" data-link-id="${esc(l.id)}">&#9998;</button>
              <button class="mini d" data-action="del" data-link-id="${esc(l.id)}">&#215;</button>
            </div>
            <img src="${esc(l.icon)}" alt="">
            <div class="meta">
              <div class="title">${esc(l.title)}</div>
              <div class="url">${esc(origin(l.url))}</div>
            </div>
          </a>`).join('');
        const empty = (c.links || []).length ? '' :
          '<div class="empty">No links yet — use the + button.</div>';
        return `
          <div class="section-title">${esc(c.name)}</div>
          <div class="grid" data-grid-cat="${esc(c.id)}">${cards}</div>${empty}`;
      }).join('');

      main.querySelectorAll('.mini[data-action]').forEach(btn => {
        btn.addEventListener('click', async e => {
          e.preventDefault(); e.stopPropagation();
          const linkId = btn.dataset.linkId;
          if (btn.dataset.action === 'edit') openEdit(linkId);
          else if (confirm('Delete this link?')) {
            const out = await api('DELETE', '/api/links', { linkId });
            state.data = out.data; render(); toast('Deleted');
          }
        });
      });

      wireDragDrop();
    }

    // ── add / edit modal ───────────────────────────────────────────
    function openAdd() {
      state.editing = null;
      document.getElementById('linkModalTitle').textContent = 'Add link';
      for (const id of ['newCategory', 'linkTitle', 'linkUrl', 'linkIcon'])
        document.getElementById(id).value = '';
      linkCategory.value = state.data.categories[0]?.id || '';
      maskLink.classList.add('open');
    }
    function openEdit(linkId) {
      const found = findLink(linkId);
      if (!found) return toast('Not found');
      state.editing = linkId;
      document.getElementById('linkModalTitle').textContent = 'Edit link';
      document.getElementById('newCategory').value = '';
      document.getElementById('linkTitle').value = found.link.title;
      document.getElementById('linkUrl').value = found.link.url;
      document.getElementById('linkIcon').value = found.link.icon;
      linkCategory.value = found.cat.id;
      maskLink.classList.add('open');
    }
    const closeLink = () => maskLink.classList.remove('open');
    document.getElementById('btnAdd').onclick = openAdd;
    document.getElementById('closeLink').onclick = closeLink;
    document.getElementById('cancelLink').onclick = closeLink;
    maskLink.addEventListener('click', e => { if (e.target === maskLink) closeLink(); });

    document.getElementById('saveLink').onclick = async () => {
      const title = document.getElementById('linkTitle').value.trim();
      const url = document.getElementById('linkUrl').value.trim();
      const icon = document.getElementById('linkIcon').value.trim();
      if (!title || !url) return toast('Title and URL are required');
      const out = state.editing
        ? await api('PUT', '/api/links', {
            linkId: state.editing, title, url, icon,
            moveToCategoryId: linkCategory.value
          })
        : await api('POST', '/api/links', {
            categoryId: linkCategory.value,
            categoryName: document.getElementById('newCategory').value.trim(),
            title, url, icon
          });
      state.data = out.data; render(); closeLink();
      toast(state.editing ? 'Updated' : 'Added');
      state.editing = null;
    };

    // ── drag & drop reorder ────────────────────────────────────────
    let drag = null;
    function wireDragDrop() {
      main.querySelectorAll('.card[draggable]').forEach(card => {
        card.addEventListener('dragstart', e => {
          drag = { linkId: card.dataset.linkId, fromCat: card.dataset.catId };
          card.classList.add('dragging');
          e.dataTransfer.effectAllowed = 'move';
        });
        card.addEventListener('dragend', () => {
          card.classList.remove('dragging');
          drag = null;
        });
        card.addEventListener('dragover', e => { if (drag) e.preventDefault(); });
        card.addEventListener('drop', async e => {
          if (!drag) return;
          e.preventDefault();
          moveLink(drag.linkId, drag.fromCat, card.dataset.catId, card.dataset.linkId);
          render();
          await persistOrder();
        });
      });
      main.querySelectorAll('.grid').forEach(grid => {
        grid.addEventListener('dragover', e => {
          if (drag) { e.preventDefault(); grid.classList.add('dragover'); }
        });
        grid.addEventListener('dragleave', () => grid.classList.remove('dragover'));
        grid.addEventListener('drop', async e => {
          if (!drag) return;
          e.preventDefault();
          grid.classList.remove('dragover');
          moveLink(drag.linkId, drag.fromCat, grid.dataset.gridCat, null);
          render();
          await persistOrder();
        });
      });
    }

    function moveLink(linkId, fromCatId, toCatId, beforeLinkId) {
      const from = state.data.categories.find(c => c.id === fromCatId);
      const to = state.data.categories.find(c => c.id === toCatId);
      if (!from || !to) return;
      const idx = from.links.findIndex(l => l.id === linkId);
      if (idx < 0) return;
      const [item] = from.links.splice(idx, 1);
      if (beforeLinkId) {
        const bi = to.links.findIndex(l => l.id === beforeLinkId);
        if (bi >= 0) { to.links.splice(bi, 0, item); return; }
      }
      to.links.push(item);
    }

    async function persistOrder() {
      const out = await api('POST', '/api/reorder', {
        data: {
          categories: state.data.categories.map(c => ({
            id: c.id,
            links: (c.links || []).map(l => ({ id: l.id }))
          }))
        }
      });
      state.data = out.data;
      toast('Saved');
    }

    // ── category manager ───────────────────────────────────────────
    const catlist = document.getElementById('catlist');
    document.getElementById('btnManage').onclick = () => {
      state.catOrder = state.data.categories.map(c => c.id);
      renderCats();
      maskCats.classList.add('open');
    };
    const closeCats = () => { maskCats.classList.remove('open'); state.catOrder = null; };
    document.getElementById('closeCats').onclick = closeCats;
    document.getElementById('cancelCats').onclick = closeCats;
    maskCats.addEventListener('click', e => { if (e.target === maskCats) closeCats(); });

    function renderCats() {
      const byId = new Map(state.data.categories.map(c => [c.id, c]));
      catlist.innerHTML = state.catOrder.map(id => `
        <div class="cat-row" draggable="true" data-cid="${esc(id)}">
          <div>${esc(byId.get(id)?.name || '')}</div>
          <button class="mini" data-rename="${esc(id)}">&#9998;</button>
        </div>`).join('');

      catlist.querySelectorAll('[data-rename]').forEach(btn => {
        btn.onclick = async e => {
          e.preventDefault(); e.stopPropagation();
          const cid = btn.dataset.rename;
          const cat = byId.get(cid);
          const name = prompt('New category name:', cat?.name || '');
          if (!name || !name.trim()) return;
          const out = await api('POST', '/api/categories/rename',
            { categoryId: cid, newName: name.trim() });
          state.data = out.data;
          renderCats(); render();
          toast('Renamed');
        };
      });

      let draggingId = null;
      catlist.querySelectorAll('.cat-row').forEach(row => {
        row.addEventListener('dragstart', () => {
          draggingId = row.dataset.cid;
          row.classList.add('dragging');
        });
        row.addEventListener('dragend', () => row.classList.remove('dragging'));
        row.addEventListener('dragover', e => { if (draggingId) e.preventDefault(); });
        row.addEventListener('drop', e => {
          if (!draggingId) return;
          e.preventDefault();
          const arr = state.catOrder;
          arr.splice(arr.indexOf(draggingId), 1);
          arr.splice(arr.indexOf(row.dataset.cid), 0, draggingId);
          renderCats();
        });
      });
    }

    // ── theme ──────────────────────────────────────────────────────
    const THEME_KEY = 'linkdeck_theme';
    const applyTheme = t =>
      document.documentElement.classList.toggle('light', t === 'light');
    let theme = localStorage.getItem(THEME_KEY) || 'dark';
    applyTheme(theme);
    document.getElementById('btnTheme').onclick = () => {
      theme = theme === 'light' ? 'dark' : 'light';
      localStorage.setItem(THEME_KEY, theme);
      applyTheme(theme);
    };

    // Mouse wheel over the top bar jumps between category sections.
    document.querySelector('.topbar').addEventListener('wheel', e => {
      e.preventDefault();
      const titles = [...document.querySelectorAll('.section-title')];
      if (!titles.length) return;
      const below = titles.findIndex(t => t.getBoundingClientRect().top > 80);
      const current = below === -1 ? titles.length - 1 : Math.max(0, below - 1);
      const next = Math.min(
        titles.length - 1,
        Math.max(0, current + (e.deltaY > 0 ? 1 : -1))
      );
      titles[next].scrollIntoView({ behavior: 'smooth', block: 'start' });
    }, { passive: false });

    document.getElementById('saveCats').onclick = async () => {
      const byId = new Map(state.data.categories.map(c => [c.id, c]));
      const next = state.catOrder.map(id => byId.get(id)).filter(Boolean);
      for (const c of state.data.categories)
        if (!next.some(x => x.id === c.id)) next.push(c);
      state.data.categories = next;
      closeCats();
      render();
      await persistOrder();
    };

    render();
  </script>
</body>
</html>"##;

/// Render the dashboard with the tree embedded as a JS literal.
///
/// `<` is escaped in the JSON so a link title cannot break out of the
/// script element.
pub fn render_dashboard(tree: &LinkTree) -> String {
    let data = serde_json::to_string(tree)
        .unwrap_or_else(|_| r#"{"categories":[]}"#.to_string())
        .replace('<', "\\u003c");
    DASHBOARD_TEMPLATE.replace("__TREE_DATA__", &data)
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use linkdeck_store::{Category, Link};

    #[test]
    fn dashboard_embeds_tree_data() {
        let tree = LinkTree {
            categories: vec![Category {
                id: "c1".into(),
                name: "Work".into(),
                links: vec![],
            }],
        };
        let page = render_dashboard(&tree);
        assert!(page.contains(r#""id":"c1""#));
        assert!(!page.contains("__TREE_DATA__"));
    }

    #[test]
    fn dashboard_carries_search_and_theme_controls() {
        let page = render_dashboard(&LinkTree { categories: vec![] });
        assert!(page.contains("google.com/search"));
        assert!(page.contains("btnTheme"));
        assert!(page.contains("linkdeck_theme"));
    }

    #[test]
    fn dashboard_escapes_angle_brackets_in_data() {
        let tree = LinkTree {
            categories: vec![Category {
                id: "c1".into(),
                name: "x".into(),
                links: vec![Link {
                    id: "l1".into(),
                    title: "</script><script>alert(1)".into(),
                    url: "https://example.com".into(),
                    icon: "https://example.com/i.png".into(),
                }],
            }],
        };
        let page = render_dashboard(&tree);
        assert!(!page.contains("</script><script>alert"));
        assert!(page.contains("\\u003c/script"));
    }
}

//! Static style sheet and client script of the interactive report.

pub(crate) const STYLE: &str = r#"
.rr { font-family: -apple-system, BlinkMacSystemFont, 'Malgun Gothic', 'Apple SD Gothic Neo', sans-serif; background: #111; color: #e5e5e5; padding: 20px; border-radius: 16px; line-height: 1.5; max-width: 760px; margin: 0 auto; }
.rr * { box-sizing: border-box; }
.rr-head { background: linear-gradient(135deg, #4a1d6a, #1a0a2e); padding: 24px; border-radius: 14px; margin-bottom: 16px; }
.rr-head h2 { margin: 0 0 6px 0; font-size: 22px; color: #fff; border: none; padding: 0; }
.rr-head p { margin: 0; font-size: 13px; color: rgba(255,255,255,0.6); }
.rr-stats { display: flex; gap: 20px; margin-top: 16px; flex-wrap: wrap; }
.rr-stat { text-align: center; }
.rr-stat strong { display: block; font-size: 22px; color: #c084fc; }
.rr-stat span { font-size: 12px; color: rgba(255,255,255,0.6); }
.rr-tabs { display: grid; grid-template-columns: repeat(4, 1fr); gap: 8px; margin-bottom: 16px; }
.rr-tab { background: #1a1a1a; border: 1px solid #333; border-radius: 10px; padding: 12px 6px; text-align: center; cursor: pointer; color: #aaa; font: inherit; }
.rr-tab .num { display: block; font-size: 20px; font-weight: 700; }
.rr-tab .lbl { font-size: 12px; }
.rr-tab.is-active { border-color: var(--accent); color: #fff; background: #202020; }
.rr-panel[hidden] { display: none; }
.rr-panel-head { display: flex; flex-wrap: wrap; gap: 6px 16px; font-size: 12px; color: #888; padding: 0 4px 12px; border-bottom: 1px solid #333; margin-bottom: 12px; }
.rr-panel-head b { color: #ddd; font-weight: 600; }
.rr-list { display: flex; flex-direction: column; gap: 8px; }
.rr-card { background: #1a1a1a; border: 1px solid #2a2a2a; border-radius: 10px; padding: 14px 16px; cursor: pointer; touch-action: pan-y; user-select: none; }
.rr-card.is-expanded { border-color: var(--accent); }
.rr-card-main { display: flex; justify-content: space-between; align-items: center; gap: 12px; }
.rr-card-left { flex: 1; min-width: 0; }
.rr-card-name { font-size: 15px; font-weight: 600; color: #fff; margin-bottom: 4px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.rr-badge { display: inline-block; margin-left: 6px; padding: 0 6px; border-radius: 6px; font-size: 10px; font-weight: 700; color: #111; background: var(--accent); vertical-align: middle; }
.rr-card-info { font-size: 12px; color: #888; }
.rr-card-info span { margin-right: 8px; }
.rr-card-price { font-size: 17px; font-weight: 700; color: var(--accent); flex-shrink: 0; }
.rr-card-detail { display: none; margin-top: 12px; padding-top: 12px; border-top: 1px dashed #333; font-size: 12px; color: #aaa; }
.rr-card.is-expanded .rr-card-detail { display: grid; grid-template-columns: auto 1fr; gap: 4px 12px; }
.rr-card-detail dt { color: #666; }
.rr-card-detail dd { margin: 0; color: #ddd; }
.rr-empty { text-align: center; padding: 20px; color: #666; font-size: 13px; }
.rr-footer { text-align: center; padding: 16px; font-size: 12px; color: #555; }
.rr-footer a { color: #c084fc; }
@media (max-width: 600px) {
  .rr-tab .num { font-size: 17px; }
  .rr-card-main { flex-direction: column; align-items: flex-start; gap: 8px; }
}
"#;

/// Mirrors `ReportUiState`: one active tab, at most one expanded card, and
/// press/release tracking that drops taps once the pointer moved vertically
/// past the drag threshold.
pub(crate) const SCRIPT: &str = r#"
(function () {
  var root = document.getElementById('rr-report');
  var source = document.getElementById('rr-data');
  if (!root || !source) { return; }
  var payload = JSON.parse(source.textContent);
  var state = { active: payload.active_category, expanded: null, gesture: null };
  var threshold = payload.ui.drag_threshold_px;
  var delay = payload.ui.scroll_delay_ms;
  var cards = {};

  function el(tag, className, text) {
    var node = document.createElement(tag);
    if (className) { node.className = className; }
    if (text !== undefined && text !== null) { node.textContent = String(text); }
    return node;
  }

  function detail(list, label, value) {
    if (value === undefined || value === null || value === '') { return; }
    list.appendChild(el('dt', null, label));
    list.appendChild(el('dd', null, value));
  }

  function buildCard(category, record) {
    var card = el('div', 'rr-card');
    card.id = 'rr-card-' + record.id;
    card.setAttribute('data-card', record.id);
    card.style.setProperty('--accent', category.accent);

    var main = el('div', 'rr-card-main');
    var left = el('div', 'rr-card-left');
    var name = el('div', 'rr-card-name', record.name);
    if (record.is_new) { name.appendChild(el('span', 'rr-badge', 'NEW')); }
    left.appendChild(name);
    var info = el('div', 'rr-card-info');
    info.appendChild(el('span', null, record.dong));
    info.appendChild(el('span', null, record.area_label));
    if (record.floor !== null) { info.appendChild(el('span', null, record.floor_label)); }
    info.appendChild(el('span', null, record.deal_month + '/' + record.deal_day));
    left.appendChild(info);
    main.appendChild(left);
    main.appendChild(el('div', 'rr-card-price', record.price_label));
    card.appendChild(main);

    var more = el('dl', 'rr-card-detail');
    detail(more, '거래일', record.date_label);
    detail(more, '지번', record.dong + ' ' + record.lot_number);
    detail(more, '면적', record.area_label);
    detail(more, '층', record.floor === null ? null : record.floor_label);
    detail(more, '건축년도', record.build_year);
    detail(more, '거래유형', record.deal_type);
    detail(more, '구분', category.label);
    card.appendChild(more);

    cards[record.id] = card;
    return card;
  }

  function renderLists() {
    payload.categories.forEach(function (category) {
      var list = root.querySelector('[data-list="' + category.slug + '"]');
      if (!list) { return; }
      if (category.records.length === 0) {
        list.appendChild(el('div', 'rr-empty', '해당 기간 거래 내역이 없습니다.'));
        return;
      }
      category.records.forEach(function (record) {
        list.appendChild(buildCard(category, record));
      });
    });
  }

  function selectTab(slug) {
    state.active = slug;
    root.querySelectorAll('[data-tab]').forEach(function (tab) {
      var on = tab.getAttribute('data-tab') === slug;
      tab.classList.toggle('is-active', on);
      tab.setAttribute('aria-selected', on ? 'true' : 'false');
    });
    root.querySelectorAll('[data-panel]').forEach(function (panel) {
      panel.hidden = panel.getAttribute('data-panel') !== slug;
    });
  }

  function setExpanded(id, on) {
    var card = cards[id];
    if (card) { card.classList.toggle('is-expanded', on); }
  }

  function tap(id) {
    if (state.expanded === id) {
      setExpanded(id, false);
      state.expanded = null;
      return;
    }
    if (state.expanded !== null) { setExpanded(state.expanded, false); }
    state.expanded = id;
    setExpanded(id, true);
    window.setTimeout(function () {
      var card = cards[id];
      if (card && state.expanded === id) {
        card.scrollIntoView({ behavior: 'smooth', block: 'nearest' });
      }
    }, delay);
  }

  function cardFrom(target) {
    var node = target && target.closest ? target.closest('[data-card]') : null;
    return node && root.contains(node) ? node.getAttribute('data-card') : null;
  }

  root.addEventListener('pointerdown', function (event) {
    var id = cardFrom(event.target);
    state.gesture = id === null ? null : { card: id, startY: event.clientY, dragged: false };
  });
  root.addEventListener('pointermove', function (event) {
    var gesture = state.gesture;
    if (gesture && Math.abs(event.clientY - gesture.startY) > threshold) {
      gesture.dragged = true;
    }
  });
  root.addEventListener('pointerup', function () {
    var gesture = state.gesture;
    state.gesture = null;
    if (gesture && !gesture.dragged) { tap(gesture.card); }
  });
  root.addEventListener('pointercancel', function () {
    state.gesture = null;
  });
  root.querySelectorAll('[data-tab]').forEach(function (tab) {
    tab.addEventListener('click', function () {
      selectTab(tab.getAttribute('data-tab'));
    });
  });

  renderLists();
  selectTab(state.active);
})();
"#;
